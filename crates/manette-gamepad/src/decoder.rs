use smallvec::SmallVec;

use crate::consts::{
    ABS_X, ABS_Y, AXIS_CENTER, EV_ABS, EV_KEY, KEY_A, KEY_B, KEY_L, KEY_PRESSED, KEY_R,
    KEY_X, KEY_Y,
};
use crate::record::RawEvent;
use crate::types::Button;

/// A logical button changed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonChange {
    pub button: Button,
    pub pressed: bool,
}

impl ButtonChange {
    pub const fn new(button: Button, pressed: bool) -> Self {
        Self { button, pressed }
    }
}

/// Changes produced by one record. An axis sample yields at most two.
pub type Signals = SmallVec<[ButtonChange; 2]>;

/// Last raw sample seen on each stick axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisState {
    pub x: i32,
    pub y: i32,
}

impl Default for AxisState {
    fn default() -> Self {
        Self {
            x: AXIS_CENTER,
            y: AXIS_CENTER,
        }
    }
}

/// Turns evdev records into button changes.
///
/// Key records map one to one. Axis records are compared with the previous
/// sample of the same axis; crossing the center fires the matching
/// direction.
#[derive(Debug, Default)]
pub struct Decoder {
    axes: AxisState,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn axes(&self) -> AxisState {
        self.axes
    }

    pub fn decode(&mut self, event: RawEvent) -> Signals {
        let mut out = Signals::new();
        match event.kind {
            EV_KEY => {
                if let Some(button) = map_key(event.code) {
                    // Autorepeat (2) counts as released.
                    out.push(ButtonChange::new(button, event.value == KEY_PRESSED));
                }
            }
            EV_ABS => match event.code {
                ABS_X => {
                    crossings(self.axes.x, event.value, Button::Left, Button::Right, &mut out);
                    self.axes.x = event.value;
                }
                ABS_Y => {
                    crossings(self.axes.y, event.value, Button::Up, Button::Down, &mut out);
                    self.axes.y = event.value;
                }
                _ => {}
            },
            _ => {}
        }
        out
    }
}

fn map_key(code: u16) -> Option<Button> {
    Some(match code {
        KEY_A => Button::A,
        KEY_B => Button::B,
        KEY_X => Button::X,
        KEY_Y => Button::Y,
        KEY_L => Button::L,
        KEY_R => Button::R,
        _ => return None,
    })
}

// A sample on the center counts as centered. The four checks are independent
// and their order fixes the order of emitted changes.
fn crossings(prev: i32, next: i32, low: Button, high: Button, out: &mut Signals) {
    const C: i32 = AXIS_CENTER;
    if prev < C && next >= C {
        out.push(ButtonChange::new(low, false));
    }
    if prev >= C && next < C {
        out.push(ButtonChange::new(low, true));
    }
    if prev > C && next <= C {
        out.push(ButtonChange::new(high, false));
    }
    if prev <= C && next > C {
        out.push(ButtonChange::new(high, true));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(decoder: &mut Decoder, events: &[RawEvent]) -> Vec<ButtonChange> {
        events.iter().flat_map(|e| decoder.decode(*e)).collect()
    }

    fn x_samples(values: &[i32]) -> Vec<ButtonChange> {
        let mut decoder = Decoder::new();
        let events: Vec<_> = values.iter().map(|v| RawEvent::abs(ABS_X, *v)).collect();
        feed(&mut decoder, &events)
    }

    fn press(b: Button) -> ButtonChange {
        ButtonChange::new(b, true)
    }

    fn release(b: Button) -> ButtonChange {
        ButtonChange::new(b, false)
    }

    #[test]
    fn repeat_is_reported_as_release() {
        let mut decoder = Decoder::new();
        let out = feed(
            &mut decoder,
            &[
                RawEvent::key(KEY_A, 1),
                RawEvent::key(KEY_A, 2),
                RawEvent::key(KEY_A, 0),
            ],
        );
        assert_eq!(out, [press(Button::A), release(Button::A), release(Button::A)]);
    }

    #[test]
    fn key_table_covers_face_and_shoulder_buttons() {
        let mut decoder = Decoder::new();
        let codes = [KEY_A, KEY_B, KEY_X, KEY_Y, KEY_L, KEY_R];
        let events: Vec<_> = codes.iter().map(|c| RawEvent::key(*c, 1)).collect();
        let buttons: Vec<_> = feed(&mut decoder, &events)
            .into_iter()
            .map(|c| c.button)
            .collect();
        assert_eq!(
            buttons,
            [Button::A, Button::B, Button::X, Button::Y, Button::L, Button::R]
        );
    }

    #[test]
    fn unknown_keys_and_axes_are_ignored() {
        let mut decoder = Decoder::new();
        let out = feed(
            &mut decoder,
            &[
                RawEvent::key(0x126, 1),
                RawEvent::abs(0x02, 0),
                RawEvent::new(0x00, 0, 0),
            ],
        );
        assert!(out.is_empty());
        assert_eq!(decoder.axes(), AxisState::default());
    }

    #[test]
    fn key_events_are_not_deduplicated() {
        let mut decoder = Decoder::new();
        let out = feed(&mut decoder, &[RawEvent::key(KEY_B, 0), RawEvent::key(KEY_B, 0)]);
        assert_eq!(out, [release(Button::B), release(Button::B)]);
    }

    #[test]
    fn center_samples_fire_nothing() {
        assert!(x_samples(&[128, 128]).is_empty());
    }

    #[test]
    fn one_below_center_presses_left() {
        assert_eq!(x_samples(&[128, 127]), [press(Button::Left)]);
    }

    #[test]
    fn back_to_center_releases_left() {
        assert_eq!(
            x_samples(&[127, 128]),
            [press(Button::Left), release(Button::Left)]
        );
    }

    #[test]
    fn one_above_center_presses_right() {
        assert_eq!(x_samples(&[128, 129]), [press(Button::Right)]);
    }

    #[test]
    fn same_side_samples_fire_once() {
        assert_eq!(x_samples(&[0, 10, 127, 5]), [press(Button::Left)]);
        assert_eq!(x_samples(&[255, 200, 129]), [press(Button::Right)]);
    }

    #[test]
    fn slow_sweep_presses_once_at_the_crossing() {
        let mut values: Vec<i32> = (100..=128).rev().collect();
        values.extend(101..=128);
        assert_eq!(
            x_samples(&values),
            [press(Button::Left), release(Button::Left)]
        );
    }

    #[test]
    fn full_swing_presses_left_then_releases_right() {
        assert_eq!(
            x_samples(&[255, 0]),
            [
                press(Button::Right),
                press(Button::Left),
                release(Button::Right)
            ]
        );
    }

    #[test]
    fn vertical_axis_drives_up_and_down() {
        let mut decoder = Decoder::new();
        let out = feed(
            &mut decoder,
            &[
                RawEvent::abs(ABS_Y, 0),
                RawEvent::abs(ABS_Y, 255),
                RawEvent::abs(ABS_Y, 128),
            ],
        );
        assert_eq!(
            out,
            [
                press(Button::Up),
                release(Button::Up),
                press(Button::Down),
                release(Button::Down)
            ]
        );
        assert_eq!(decoder.axes(), AxisState { x: 128, y: 128 });
    }

    #[test]
    fn axes_are_independent() {
        let mut decoder = Decoder::new();
        let out = feed(
            &mut decoder,
            &[RawEvent::abs(ABS_X, 0), RawEvent::abs(ABS_Y, 128)],
        );
        assert_eq!(out, [press(Button::Left)]);
        assert_eq!(decoder.axes(), AxisState { x: 0, y: 128 });
    }

    #[test]
    fn stored_sample_is_replaced_even_without_signal() {
        let mut decoder = Decoder::new();
        decoder.decode(RawEvent::abs(ABS_X, 200));
        assert!(decoder.decode(RawEvent::abs(ABS_X, 130)).is_empty());
        assert_eq!(decoder.axes().x, 130);
    }
}
