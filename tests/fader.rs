mod tests {
    use ledpixelmath::{PixelFader, Rgb, trigger_strip};

    #[test]
    fn test_new_pixel_is_black() {
        let mut pixel = PixelFader::new(7);
        assert_eq!(pixel.index(), 7);
        assert!(!pixel.is_fade_complete());
        assert_eq!(pixel.trigger(), Rgb::new(0, 0, 0));
        assert!(pixel.is_fade_complete());
    }

    #[test]
    fn test_fade_steps_one_unit_per_trigger() {
        let mut pixel = PixelFader::new(0);
        pixel.fill(Rgb::new(10, 10, 10));
        pixel.fade_to(Rgb::new(12, 8, 10));

        assert_eq!(pixel.trigger(), Rgb::new(11, 9, 10));
        assert!(!pixel.is_fade_complete());
        assert_eq!(pixel.trigger(), Rgb::new(12, 8, 10));
        // Completion is seen on the trigger after reaching the target
        assert!(!pixel.is_fade_complete());
        assert_eq!(pixel.trigger(), Rgb::new(12, 8, 10));
        assert!(pixel.is_fade_complete());
    }

    #[test]
    fn test_full_range_fade() {
        let mut pixel = PixelFader::new(0);
        pixel.fade_to(Rgb::new(255, 0, 128));
        let mut triggers = 0;
        while !pixel.is_fade_complete() {
            pixel.trigger();
            triggers += 1;
        }
        assert_eq!(triggers, 256);
        assert_eq!(pixel.current(), Rgb::new(255, 0, 128));

        pixel.fade_to(Rgb::new(0, 0, 0));
        assert!(!pixel.is_fade_complete());
        for _ in 0..255 {
            pixel.trigger();
        }
        assert_eq!(pixel.current(), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_fill_jumps_to_color() {
        let mut pixel = PixelFader::new(3);
        pixel.fade_to(Rgb::new(100, 100, 100));
        pixel.trigger();
        pixel.fill(Rgb::new(40, 50, 60));
        assert_eq!(pixel.current(), Rgb::new(40, 50, 60));
        assert_eq!(pixel.target(), Rgb::new(40, 50, 60));
        assert!(!pixel.is_fade_complete());
        assert_eq!(pixel.trigger(), Rgb::new(40, 50, 60));
        assert!(pixel.is_fade_complete());
    }

    #[test]
    fn test_trigger_strip() {
        let mut faders: [PixelFader; 3] = core::array::from_fn(|i| PixelFader::new(i as u32));
        let mut frame = [Rgb::default(); 3];
        faders[1].fade_to(Rgb::new(1, 0, 0));

        assert!(!trigger_strip(&mut faders, &mut frame));
        assert_eq!(frame[1], Rgb::new(1, 0, 0));
        assert!(trigger_strip(&mut faders, &mut frame));
        assert_eq!(frame, [Rgb::new(0, 0, 0), Rgb::new(1, 0, 0), Rgb::new(0, 0, 0)]);
    }
}
