mod common;

mod tests {
    use std::convert::Infallible;

    use embedded_hal::digital::{ErrorType, OutputPin};
    use myrtio_usb_lamp::protocol::{self, Channel};
    use myrtio_usb_lamp::{
        Channels, Heartbeat, Lamp, LampConfig, LampDriver, OscillatorCalibration, Polarity,
        RGB8, Request, TickTimer, Ws2812Lamp,
    };
    use smart_leds::SmartLedsWrite;

    use crate::common::{Event, RecordingDriver};

    fn quiet_config() -> LampConfig {
        LampConfig {
            heartbeat: Heartbeat::DISABLED,
            ..LampConfig::default()
        }
    }

    fn send(lamp: &mut Lamp<RecordingDriver>, request: Request) -> usize {
        lamp.setup(&request.to_packet().encode())
    }

    #[test]
    fn test_start_blanks_led() {
        let mut lamp = Lamp::new(RecordingDriver::new(), &LampConfig::default());
        lamp.start();
        assert_eq!(
            lamp.driver().events,
            vec![Event::Write(Channels::BLACK), Event::Status(true)]
        );
    }

    #[test]
    fn test_boot_blink_lasts_ten_ticks() {
        let timer = TickTimer::new();
        let mut lamp = Lamp::new(RecordingDriver::new(), &LampConfig::default());
        lamp.start();

        for _ in 0..9 {
            timer.on_compare_match();
            lamp.poll(&timer);
        }
        assert_eq!(lamp.driver().status_changes(), vec![true]);

        for _ in 0..11 {
            timer.on_compare_match();
            lamp.poll(&timer);
        }
        assert_eq!(lamp.driver().status_changes(), vec![true, false]);
    }

    #[test]
    fn test_poll_runs_once_per_tick() {
        let timer = TickTimer::new();
        let mut lamp = Lamp::new(RecordingDriver::new(), &quiet_config());
        for request in protocol::fade_to(1000, 0, 0, None) {
            send(&mut lamp, request);
        }

        assert!(lamp.poll(&timer).is_none());

        timer.on_compare_match();
        assert!(lamp.poll(&timer).is_some());
        assert!(lamp.poll(&timer).is_none());
        assert_eq!(lamp.state().current.red, 256);

        // Ticks that pile up between polls count as one step
        timer.on_compare_match();
        timer.on_compare_match();
        lamp.poll(&timer);
        assert_eq!(lamp.state().current.red, 512);
        assert_eq!(lamp.driver().writes().len(), 2);
    }

    #[test]
    fn test_reset_after_fade() {
        let mut lamp = Lamp::new(RecordingDriver::new(), &quiet_config());
        for request in protocol::fade_to(40000, 20000, 10000, Some(1000)) {
            send(&mut lamp, request);
        }
        for time in 1..=5 {
            lamp.tick(time);
        }
        lamp.driver_mut().clear();

        assert_eq!(send(&mut lamp, protocol::off()), 0);
        assert_eq!(lamp.state().current, Channels::BLACK);
        assert_eq!(lamp.state().target, Channels::BLACK);
        assert_eq!(lamp.driver().writes(), vec![Channels::BLACK]);

        // Nothing left to animate
        for time in 6..=100 {
            lamp.tick(time);
        }
        assert_eq!(lamp.driver().writes().len(), 1);
    }

    #[test]
    fn test_set_channel_cancels_running_fade() {
        let mut lamp = Lamp::new(RecordingDriver::new(), &quiet_config());
        send(&mut lamp, Request::FadeChannel(Channel::Blue, 5000));
        lamp.tick(1);
        send(&mut lamp, Request::SetChannel(Channel::Red, 10));

        assert_eq!(lamp.state().current, Channels::new(10, 0, 256));
        assert!(!lamp.state().is_fading());
    }

    struct Calibration(u32);

    impl OscillatorCalibration for Calibration {
        fn calibrate(&mut self) {
            self.0 += 1;
        }
    }

    #[test]
    fn test_usb_reset_calibrates() {
        let mut lamp = Lamp::new(RecordingDriver::new(), &LampConfig::default());
        let mut calibration = Calibration(0);
        lamp.usb_reset(&mut calibration);
        lamp.usb_reset(&mut calibration);
        assert_eq!(calibration.0, 2);
        assert!(lamp.driver().events.is_empty());
    }

    #[derive(Default)]
    struct Strip {
        frames: Vec<Vec<RGB8>>,
    }

    impl SmartLedsWrite for Strip {
        type Error = Infallible;
        type Color = RGB8;

        fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
        where
            T: IntoIterator<Item = I>,
            I: Into<Self::Color>,
        {
            self.frames.push(iterator.into_iter().map(Into::into).collect());
            Ok(())
        }
    }

    #[derive(Default)]
    struct Pin {
        high: Option<bool>,
    }

    impl ErrorType for Pin {
        type Error = Infallible;
    }

    impl OutputPin for Pin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = Some(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = Some(true);
            Ok(())
        }
    }

    #[test]
    fn test_ws2812_lamp_chain() {
        let mut lamp: Ws2812Lamp<Strip, Pin, 3> =
            Ws2812Lamp::new(Strip::default(), Pin::default(), Polarity::ActiveLow);

        lamp.write(Channels::new(u16::MAX, 0, 128));
        lamp.set_status_led(true);

        let (strip, pin) = lamp.release();
        assert_eq!(strip.frames, vec![vec![RGB8::new(255, 0, 1); 3]]);
        assert_eq!(pin.high, Some(false));
    }

    #[test]
    fn test_ws2812_lamp_polarity_from_config() {
        let config = LampConfig {
            status_polarity: Polarity::ActiveHigh,
            ..LampConfig::default()
        };
        let mut lamp: Ws2812Lamp<Strip, Pin> =
            Ws2812Lamp::from_config(Strip::default(), Pin::default(), &config);
        lamp.set_status_led(false);
        let (_, pin) = lamp.release();
        assert_eq!(pin.high, Some(false));

        let mut lamp: Ws2812Lamp<Strip, Pin> =
            Ws2812Lamp::from_config(Strip::default(), Pin::default(), &LampConfig::default());
        lamp.set_status_led(false);
        let (_, pin) = lamp.release();
        assert_eq!(pin.high, Some(true));
    }

    #[test]
    fn test_ws2812_lamp_active_high_status() {
        let mut lamp: Ws2812Lamp<Strip, Pin> =
            Ws2812Lamp::new(Strip::default(), Pin::default(), Polarity::ActiveHigh);
        lamp.set_status_led(true);
        let (_, pin) = lamp.release();
        assert_eq!(pin.high, Some(true));
    }
}
