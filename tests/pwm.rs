mod tests {
    use led_cadence::pwm::{switch_off_tick, tick_threshold};
    use led_cadence::{Cycle, DigitalOutput, DutyTable, PWM_CYCLE_MS, PwmTask, Task};

    #[derive(Debug, Default, Clone, Copy)]
    struct Pin {
        configured: bool,
        released: bool,
        high: bool,
    }

    impl DigitalOutput for Pin {
        fn configure_output(&mut self) {
            self.configured = true;
            self.released = false;
        }

        fn release(&mut self) {
            self.released = true;
            self.configured = false;
        }

        fn set_high(&mut self) {
            assert!(self.configured, "pin driven before configuration");
            self.high = true;
        }

        fn set_low(&mut self) {
            assert!(self.configured, "pin driven before configuration");
            self.high = false;
        }
    }

    /// Run the task for `window_ms` simulated milliseconds and return the
    /// observed duty of each channel scaled to 0..=255.
    fn observe<const N: usize>(task: &mut PwmTask<'_, Pin, N>, window_ms: u32) -> [u8; N] {
        let mut on_ms = [0u32; N];
        let mut time_ms = 0u32;
        let mut sleep_ms = 1u8;
        while time_ms < window_ms {
            let wake = task.cycle(Cycle::Elapsed(sleep_ms));
            assert!(!wake.is_shutdown());
            sleep_ms = wake.as_raw();
            assert!(sleep_ms >= 1 && sleep_ms <= PWM_CYCLE_MS);

            for (on, pin) in on_ms.iter_mut().zip(task.outputs()) {
                if pin.high {
                    *on += u32::from(sleep_ms);
                }
            }
            time_ms += u32::from(sleep_ms);
        }
        on_ms.map(|ms| u8::try_from(255 * ms / time_ms).unwrap())
    }

    fn started<'a, const N: usize>(duties: &'a DutyTable<N>) -> PwmTask<'a, Pin, N> {
        let mut task = PwmTask::new(duties, [Pin::default(); N]);
        task.cycle(Cycle::Startup);
        task
    }

    #[test]
    fn test_set_get() {
        let duties = DutyTable::<3>::new();
        duties.set(0, 0x11);
        duties.set(1, 0x72);
        duties.set(2, 0xF3);
        for channel in 3..=u8::MAX {
            duties.set(channel, 44);
        }

        assert_eq!(duties.get(0), 0x11);
        assert_eq!(duties.get(1), 0x72);
        assert_eq!(duties.get(2), 0xF3);
        for channel in 3..=u8::MAX {
            assert_eq!(duties.get(channel), 0);
        }
    }

    #[test]
    fn test_startup_and_shutdown() {
        let duties = DutyTable::<3>::new();
        let mut task = PwmTask::new(&duties, [Pin::default(); 3]);

        assert_eq!(task.cycle(Cycle::Startup).as_raw(), 1);
        assert!(task.outputs().iter().all(|pin| pin.configured));

        assert_eq!(task.cycle(Cycle::Shutdown).as_raw(), 1);
        assert!(task.outputs().iter().all(|pin| pin.released && !pin.configured));
    }

    #[test]
    fn test_off_duty() {
        let duties = DutyTable::<3>::new();
        let mut task = started(&duties);
        assert_eq!(observe(&mut task, 2000), [0, 0, 0]);
    }

    #[test]
    fn test_quarter_duty() {
        let duties = DutyTable::<3>::new();
        duties.set(1, 0x40);
        duties.set(2, 0xC0);
        let mut task = started(&duties);

        let [ch0, ch1, ch2] = observe(&mut task, 2000);
        assert_eq!(ch0, 0);
        assert!(ch1.abs_diff(0x40) <= 1, "{ch1}");
        assert!(ch2.abs_diff(0xC0) <= 1, "{ch2}");
    }

    #[test]
    fn test_half_duty() {
        let duties = DutyTable::<3>::new();
        duties.set(0, 0x80);
        duties.set(2, 0x7F);
        let mut task = started(&duties);

        let [ch0, ch1, ch2] = observe(&mut task, 2000);
        assert!(ch0.abs_diff(0x80) <= 1, "{ch0}");
        assert_eq!(ch1, 0);
        assert!(ch2.abs_diff(0x7F) <= 1, "{ch2}");
    }

    #[test]
    fn test_on_duty() {
        let duties = DutyTable::<3>::new();
        for channel in 0..3 {
            duties.set(channel, 0xFF);
        }
        let mut task = started(&duties);
        assert_eq!(observe(&mut task, 2000), [0xFF; 3]);
    }

    #[test]
    fn test_full_on_wakes_once_per_cycle() {
        let duties = DutyTable::<1>::new();
        duties.set(0, 0xFF);
        let mut task = started(&duties);
        assert_eq!(task.cycle(Cycle::Elapsed(1)).as_raw(), PWM_CYCLE_MS);
        assert_eq!(task.cycle(Cycle::Elapsed(PWM_CYCLE_MS)).as_raw(), PWM_CYCLE_MS);
    }

    #[test]
    fn test_every_duty_within_one_tick() {
        for duty in 0..=u8::MAX {
            let duties = DutyTable::<1>::new();
            duties.set(0, duty);
            let mut task = started(&duties);

            let [observed] = observe(&mut task, 10 * u32::from(PWM_CYCLE_MS));
            let tick = 256 / u16::from(PWM_CYCLE_MS);
            assert!(
                u16::from(observed).abs_diff(u16::from(duty)) <= tick,
                "duty {duty} observed {observed}"
            );
        }
    }

    #[test]
    fn test_late_call_wraps_cycle() {
        let duties = DutyTable::<1>::new();
        duties.set(0, 0x80);
        let mut task = started(&duties);

        task.cycle(Cycle::Elapsed(1));
        assert_eq!(task.tick(), 0);
        // 250 ms late lands on tick 10 of a later cycle, past the switch-off
        task.cycle(Cycle::Elapsed(250));
        assert_eq!(task.tick(), 10);
        assert!(!task.outputs()[0].high);
    }

    #[test]
    fn test_scaling() {
        assert_eq!(tick_threshold(0), 0);
        assert_eq!(tick_threshold(8), 128);
        assert_eq!(tick_threshold(PWM_CYCLE_MS - 1), 240);
        assert_eq!(switch_off_tick(0x80), 8);
        assert_eq!(switch_off_tick(0x40), 4);
        assert_eq!(switch_off_tick(0xFF), PWM_CYCLE_MS);
    }
}
