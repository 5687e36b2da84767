mod tests {
    use embassy_time::Duration;
    use ledpixelmath::math8::{check_channel_max, mix_round, progress8, round_clamp, scale_round};

    #[test]
    fn test_round_clamp() {
        assert_eq!(round_clamp(0.49, 255), 0);
        assert_eq!(round_clamp(0.5, 255), 1);
        assert_eq!(round_clamp(127.5, 255), 128);
        assert_eq!(round_clamp(-3.0, 255), 0);
        assert_eq!(round_clamp(300.0, 255), 255);
        assert_eq!(round_clamp(120.0, 100), 100);
        assert_eq!(round_clamp(f32::NAN, 255), 0);
        assert_eq!(round_clamp(f32::INFINITY, 255), 255);
    }

    #[test]
    fn test_scale_round() {
        assert_eq!(scale_round(255, 0.5, 255), 128);
        assert_eq!(scale_round(128, 0.5, 255), 64);
        assert_eq!(scale_round(128, 0.0, 255), 0);
        assert_eq!(scale_round(200, 2.0, 255), 255);
    }

    #[test]
    fn test_mix_round() {
        assert_eq!(mix_round(100, 200, 0.5, 255), 150);
        assert_eq!(mix_round(0, 255, 0.5, 255), 128);
        assert_eq!(mix_round(255, 0, 0.5, 255), 128);
        assert_eq!(mix_round(10, 20, 0.0, 255), 10);
        assert_eq!(mix_round(10, 20, 1.0, 255), 20);
    }

    #[test]
    fn test_check_channel_max() {
        assert!(check_channel_max(0).is_err());
        assert!(check_channel_max(1).is_ok());
        assert!(check_channel_max(255).is_ok());
    }

    #[test]
    fn test_progress8() {
        assert_eq!(
            progress8(Duration::from_millis(0), Duration::from_millis(100)),
            0
        );
        assert_eq!(
            progress8(Duration::from_millis(50), Duration::from_millis(100)),
            127
        );
        assert_eq!(
            progress8(Duration::from_millis(100), Duration::from_millis(100)),
            255
        );
        assert_eq!(
            progress8(Duration::from_millis(10), Duration::from_millis(0)),
            255
        );
    }
}
