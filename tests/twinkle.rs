mod tests {
    use led_cadence::{DutyTable, Twinkle, TwinkleLight, light_duty, ring_distance};

    const CH_0_POS: u8 = 0;
    const CH_1_POS: u8 = 128;
    const LIGHTS: [TwinkleLight; 2] = [
        TwinkleLight::new(0, CH_0_POS),
        TwinkleLight::new(1, CH_1_POS),
    ];

    #[test]
    fn test_on() {
        let duties = DutyTable::<2>::new();
        let twinkle = Twinkle::new(&duties, &LIGHTS);
        twinkle.set_brightness(255);
        for position in 0..=u8::MAX {
            twinkle.set_position(position);
            assert_eq!(duties.get(0), 255);
            assert_eq!(duties.get(1), 255);
        }
    }

    #[test]
    fn test_off() {
        let duties = DutyTable::<2>::new();
        duties.set(0, 99);
        duties.set(1, 99);
        let twinkle = Twinkle::new(&duties, &LIGHTS);
        twinkle.set_brightness(0);
        for position in 0..=u8::MAX {
            twinkle.set_position(position);
            assert_eq!(duties.get(0), 0);
            assert_eq!(duties.get(1), 0);
        }
    }

    #[test]
    fn test_point() {
        let duties = DutyTable::<2>::new();
        let twinkle = Twinkle::new(&duties, &LIGHTS);
        twinkle.set_brightness(1);
        for position in 0..=u8::MAX {
            twinkle.set_position(position);
            // The folded far side puts one neighbour at distance zero too
            let ch0_lit = position == 0 || position == 255;
            let ch1_lit = position == 127 || position == 128;
            assert_eq!(duties.get(0), if ch0_lit { 255 } else { 0 }, "{position}");
            assert_eq!(duties.get(1), if ch1_lit { 255 } else { 0 }, "{position}");
        }
    }

    #[test]
    fn test_set_get() {
        let duties = DutyTable::<2>::new();
        let twinkle = Twinkle::new(&duties, &LIGHTS);
        assert_eq!(twinkle.brightness(), 0);
        assert_eq!(twinkle.position(), 0);

        twinkle.set_brightness(123);
        twinkle.set_position(234);
        assert_eq!(twinkle.brightness(), 123);
        assert_eq!(twinkle.position(), 234);

        twinkle.set_brightness(255);
        twinkle.set_position(255);
        assert_eq!(twinkle.brightness(), 255);
        assert_eq!(twinkle.position(), 255);
    }

    #[test]
    fn test_transition() {
        let duties = DutyTable::<2>::new();
        let twinkle = Twinkle::new(&duties, &LIGHTS);
        twinkle.set_brightness(63);

        let half = |duty: u8| duty.abs_diff(128) <= 4;
        let cases: [(u8, fn(u8) -> bool, fn(u8) -> bool); 14] = [
            (0, |d| d == 255, |d| d == 0),
            (31, |d| d == 255, |d| d == 0),
            (47, half, |d| d == 0),
            (64, |d| d == 0, |d| d == 0),
            (80, |d| d == 0, half),
            (100, |d| d == 0, |d| d == 255),
            (128, |d| d == 0, |d| d == 255),
            (150, |d| d == 0, |d| d == 255),
            (175, |d| d == 0, half),
            (192, |d| d == 0, |d| d == 0),
            (208, half, |d| d == 0),
            (230, |d| d == 255, |d| d == 0),
            (255, |d| d == 255, |d| d == 0),
            (16, |d| d == 255, |d| d == 0),
        ];
        for (position, ch0, ch1) in cases {
            twinkle.set_position(position);
            assert!(ch0(duties.get(0)), "ch0 at {position}: {}", duties.get(0));
            assert!(ch1(duties.get(1)), "ch1 at {position}: {}", duties.get(1));
        }
    }

    #[test]
    fn test_symmetric_across_wrap() {
        for brightness in [1, 40, 63, 85, 200, 255] {
            for offset in 0..128u8 {
                let before = light_duty(ring_distance(255 - offset, 0), brightness);
                let after = light_duty(ring_distance(offset, 0), brightness);
                assert_eq!(before, after, "brightness {brightness} offset {offset}");
            }
        }
    }

    #[test]
    fn test_ring_distance() {
        assert_eq!(ring_distance(10, 10), 0);
        assert_eq!(ring_distance(10, 0), 10);
        assert_eq!(ring_distance(0, 10), 9);
        assert_eq!(ring_distance(0, 128), 127);
        assert_eq!(ring_distance(128, 0), 127);
        assert_eq!(ring_distance(127, 0), 127);
    }

    #[test]
    fn test_falloff_is_monotonic() {
        for brightness in 1..=u8::MAX {
            let mut previous = u8::MAX;
            for distance in 0..128 {
                let duty = light_duty(distance, brightness);
                assert!(duty <= previous, "brightness {brightness} distance {distance}");
                previous = duty;
            }
        }
    }

    #[test]
    fn test_missing_channel_ignored() {
        let lights = [TwinkleLight::new(0, 0), TwinkleLight::new(9, 0)];
        let duties = DutyTable::<1>::new();
        let twinkle = Twinkle::new(&duties, &lights);
        twinkle.set_brightness(255);
        assert_eq!(duties.get(0), 255);
        assert_eq!(duties.get(9), 0);
    }
}
