mod common;

mod tests {
    use std::sync::atomic::AtomicBool;

    use myrtio_ws2812_spi::{
        BitPatterns, ColorOrder, DemoId, DemoOutcome, Pacer, PixelStrip, Rgb,
        color::{BLACK, BLUE, GREEN, RED},
        demo::{Christmas, pixel_walk, run_and_close, run_demos, solid_sweep, walk_color},
    };

    use crate::common::{MockDelay, decode_colors, open_strip};

    const P: BitPatterns = BitPatterns::DEFAULT;

    /// In-memory backend recording every shown frame
    #[derive(Default)]
    struct RecordingStrip {
        pixels: Vec<Rgb>,
        shown: Vec<Vec<Rgb>>,
        fail_show_at: Option<usize>,
        closes: usize,
    }

    impl RecordingStrip {
        fn new(count: usize) -> Self {
            Self {
                pixels: vec![BLACK; count],
                ..Self::default()
            }
        }
    }

    impl PixelStrip for RecordingStrip {
        type Error = &'static str;

        fn pixel_count(&self) -> usize {
            self.pixels.len()
        }

        fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), Self::Error> {
            *self.pixels.get_mut(index).ok_or("index")? = color;
            Ok(())
        }

        fn fill(&mut self, color: Rgb) -> Result<(), Self::Error> {
            self.pixels.fill(color);
            Ok(())
        }

        fn show(&mut self) -> Result<(), Self::Error> {
            if self.fail_show_at == Some(self.shown.len()) {
                self.fail_show_at = None;
                return Err("bus");
            }
            self.shown.push(self.pixels.clone());
            Ok(())
        }

        fn close(&mut self) -> Result<(), Self::Error> {
            self.closes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_demo_id_round_trip() {
        for raw in 0..4 {
            let id = DemoId::from_raw(raw).unwrap();
            assert_eq!(id as u8, raw);
            assert_eq!(DemoId::parse_from_str(id.as_str()), Some(id));
        }
        assert_eq!(DemoId::from_raw(4), None);
        assert_eq!(DemoId::parse_from_str("rainbow"), None);
        assert_eq!(
            DemoId::parse_from_str("rainbow_chase"),
            Some(DemoId::RainbowChase)
        );
    }

    #[test]
    fn test_solid_sweep_frames() {
        let abort = AtomicBool::new(false);
        let mut pacer = Pacer::new(MockDelay::new(), &abort);
        let mut strip = RecordingStrip::new(3);

        assert_eq!(
            solid_sweep(&mut strip, &mut pacer),
            Ok(DemoOutcome::Completed)
        );
        let firsts: Vec<Rgb> = strip.shown.iter().map(|frame| frame[0]).collect();
        assert_eq!(firsts[..4], [RED, GREEN, BLUE, Rgb::new(255, 255, 255)]);
        assert_eq!(strip.shown.last().unwrap(), &vec![BLACK; 3]);
    }

    #[test]
    fn test_pixel_walk_lights_one_more_pixel_per_frame() {
        let abort = AtomicBool::new(false);
        let mut pacer = Pacer::new(MockDelay::new(), &abort);
        let mut strip = RecordingStrip::new(9);

        pixel_walk(&mut strip, &mut pacer).unwrap();

        // clear, one frame per pixel, clear
        assert_eq!(strip.shown.len(), 1 + 9 + 1);
        for (step, frame) in strip.shown[1..10].iter().enumerate() {
            for (index, &color) in frame.iter().enumerate() {
                if index <= step {
                    assert_eq!(color, walk_color(index));
                } else {
                    assert_eq!(color, BLACK);
                }
            }
        }
        assert_eq!(walk_color(7), walk_color(0));
    }

    #[test]
    fn test_christmas_uses_tree_colors() {
        let abort = AtomicBool::new(false);
        let mut pacer = Pacer::new(MockDelay::new(), &abort);
        let mut strip = RecordingStrip::new(64);

        Christmas::new(1234)
            .with_rounds(3)
            .run(&mut strip, &mut pacer)
            .unwrap();

        assert_eq!(strip.shown.len(), 4);
        for frame in &strip.shown[..3] {
            assert!(frame.iter().all(|c| [RED, GREEN, BLUE].contains(c)));
            let greens = frame.iter().filter(|&&c| c == GREEN).count();
            assert!(greens > frame.len() / 2);
        }
    }

    #[test]
    fn test_full_sequence_through_strip() {
        let abort = AtomicBool::new(false);
        let mut delay = MockDelay::new();
        let (mut strip, transport) = open_strip(5);

        let outcome = {
            let mut pacer = Pacer::new(&mut delay, &abort);
            run_demos(&mut strip, &mut pacer, &DemoId::STRIP_TEST)
        };

        assert_eq!(outcome, Ok(DemoOutcome::Completed));
        // sweep 4 + 1, walk 1 + 5 + 1, chase 255 + 1, final clear 1
        assert_eq!(transport.log().frames.len(), 5 + 7 + 256 + 1);
        assert!(transport.last_frame().iter().all(|&byte| byte == P.zero));
        assert!(transport.log().open);
        // sweep 4, walk 5 + 1, chase 255, two gaps
        assert_eq!(delay.pauses, 4 + 6 + 255 + 2);
    }

    #[test]
    fn test_interrupt_leaves_strip_dark_and_released() {
        let abort = AtomicBool::new(false);
        let mut pacer = Pacer::new(MockDelay::abort_at(&abort, 3), &abort);
        let (strip, transport) = open_strip(6);

        let outcome = run_and_close(strip, &mut pacer, &DemoId::STRIP_TEST);
        assert_eq!(outcome, Ok(DemoOutcome::Interrupted));

        let log = transport.log();
        assert!(!log.open);
        assert_eq!(log.releases, 1);
        // red, green, blue, final clear, blanking frame from close
        assert_eq!(log.frames.len(), 5);
        let colors = decode_colors(&log.frames[2], P, ColorOrder::Grb);
        assert_eq!(colors, [BLUE; 6]);
        let last = decode_colors(log.frames.last().unwrap(), P, ColorOrder::Grb);
        assert_eq!(last, [BLACK; 6]);
    }

    #[test]
    fn test_abort_before_start_only_clears() {
        let abort = AtomicBool::new(true);
        let mut pacer = Pacer::new(MockDelay::new(), &abort);
        let mut strip = RecordingStrip::new(2);

        let outcome = run_demos(&mut strip, &mut pacer, &DemoId::STRIP_TEST);
        assert_eq!(outcome, Ok(DemoOutcome::Interrupted));
        assert_eq!(strip.shown, [vec![BLACK; 2]]);
    }

    #[test]
    fn test_failed_demo_still_clears_and_closes() {
        let abort = AtomicBool::new(false);
        let mut pacer = Pacer::new(MockDelay::new(), &abort);
        let mut strip = RecordingStrip::new(2);
        strip.fail_show_at = Some(1);

        let outcome = run_demos(&mut strip, &mut pacer, &[DemoId::SolidSweep]);
        assert_eq!(outcome, Err("bus"));
        assert_eq!(strip.shown.len(), 2);
        assert_eq!(strip.shown[1], vec![BLACK; 2]);

        let outcome = run_and_close(&mut strip, &mut pacer, &[]);
        assert_eq!(outcome, Ok(DemoOutcome::Completed));
        assert_eq!(strip.closes, 1);
        assert_eq!(strip.shown.len(), 3);
    }
}
