mod tests {
    use myrtio_usb_lamp::timer::{REFERENCE_CLOCK_HZ, REFERENCE_PRESCALER};
    use myrtio_usb_lamp::{Instant, TickTimer, TimeVal, TimerConfig};

    #[test]
    fn test_reference_compare_value() {
        let config = TimerConfig::for_clock(REFERENCE_CLOCK_HZ, REFERENCE_PRESCALER);
        assert_eq!(config.counts, 129);
        assert_eq!(config.compare_value(), 128);
        assert_eq!(config, TimerConfig::default());
        // 129 * 128 / 16.5 MHz
        assert_eq!(config.tick_ns(REFERENCE_CLOCK_HZ), 1_000_727);
    }

    #[test]
    fn test_read_and_clear() {
        let timer = TickTimer::new();
        assert_eq!(timer.read_and_clear(), TimeVal::new(0));

        timer.on_compare_match();
        assert!(timer.is_updated());
        let now = timer.read_and_clear();
        assert_eq!(
            now,
            TimeVal {
                time: 1,
                updated: true
            }
        );
        assert!(!timer.is_updated());
        assert_eq!(timer.read_and_clear(), TimeVal::new(1));
    }

    #[test]
    fn test_missed_reads_collapse_into_one_update() {
        let timer = TickTimer::new();
        for _ in 0..5 {
            timer.on_compare_match();
        }
        let now = timer.read_and_clear();
        assert!(now.updated);
        assert_eq!(now.time, 5);
        assert!(!timer.read_and_clear().updated);
    }

    #[test]
    fn test_instant_conversion() {
        assert_eq!(TimeVal::new(1500).instant(), Instant::from_millis(1500));
    }

    #[test]
    fn test_counter_wraps_to_zero() {
        let timer = TickTimer::starting_at(u32::MAX);
        timer.on_compare_match();
        assert_eq!(
            timer.read_and_clear(),
            TimeVal {
                time: 0,
                updated: true
            }
        );
        timer.on_compare_match();
        assert_eq!(timer.read_and_clear().time, 1);
    }
}
