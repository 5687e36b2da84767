mod tests {
    use std::thread;

    use ledpixelmath::{PixelLayout, PixelsMut, SharedEngine, Target};

    static ENGINE: SharedEngine = SharedEngine::new();

    #[test]
    fn test_shared_engine_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                thread::spawn(|| {
                    let mut data = [0u8, 128, 255, 64, 32, 16];
                    ENGINE
                        .with(|engine| {
                            let target =
                                Target::InPlace(PixelsMut::new(&mut data, PixelLayout::Rgb)?);
                            engine.apply_gamma(target, 2.2, 255)
                        })
                        .unwrap();
                    data
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.iter().all(|r| *r == results[0]));
        assert_eq!(results[0][..3], [0, 56, 255]);
        assert_eq!(ENGINE.with(|engine| engine.gamma_cache().rebuilds()), 1);
    }
}
