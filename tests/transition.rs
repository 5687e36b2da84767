mod tests {
    use embassy_time::{Duration, Instant};
    use ledpixelmath::{Crossfade, Engine, PixelLayout, PixelsMut, Target};

    #[test]
    fn test_crossfade_mix() {
        let fade = Crossfade::new(Duration::from_millis(100), Instant::from_millis(1000));
        assert_eq!(fade.mix_at(Instant::from_millis(500)), 0.0);
        assert_eq!(fade.mix_at(Instant::from_millis(1000)), 0.0);
        assert_eq!(fade.progress(Instant::from_millis(1050)), 127);
        assert!(!fade.is_complete(Instant::from_millis(1099)));
        assert_eq!(fade.mix_at(Instant::from_millis(1100)), 1.0);
        assert!(fade.is_complete(Instant::from_millis(2000)));
    }

    #[test]
    fn test_crossfade_zero_duration_is_complete() {
        let fade = Crossfade::new(Duration::from_millis(0), Instant::from_millis(0));
        assert!(fade.is_complete(Instant::from_millis(0)));
        assert_eq!(fade.mix_at(Instant::from_millis(0)), 1.0);
    }

    #[test]
    fn test_crossfade_restart() {
        let mut fade = Crossfade::new(Duration::from_millis(100), Instant::from_millis(0));
        assert!(fade.is_complete(Instant::from_millis(200)));
        fade.restart(Instant::from_millis(200));
        assert!(!fade.is_complete(Instant::from_millis(250)));
    }

    #[test]
    fn test_crossfade_drives_blend() {
        let fade = Crossfade::new(Duration::from_millis(100), Instant::from_millis(0));
        let mut engine = Engine::new();
        let next = [200, 200, 200];

        let mut start = [100, 100, 100];
        let target = Target::InPlace(PixelsMut::new(&mut start, PixelLayout::Rgb).unwrap());
        engine
            .blend(target, &next, fade.mix_at(Instant::from_millis(0)), 255)
            .unwrap();
        assert_eq!(start, [100, 100, 100]);

        let mut end = [100, 100, 100];
        let target = Target::InPlace(PixelsMut::new(&mut end, PixelLayout::Rgb).unwrap());
        engine
            .blend(target, &next, fade.mix_at(Instant::from_millis(100)), 255)
            .unwrap();
        assert_eq!(end, next);
    }
}
