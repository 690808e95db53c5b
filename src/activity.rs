use crate::channel::SwitchState;

/// True when at least one of this cycle's raw reads is pressed.
///
/// Fed with undebounced samples so the cat reacts before a macro fires.
pub fn any_pressed(raw: &[SwitchState]) -> bool {
    raw.iter().any(|s| s.is_pressed())
}

/// True when every channel listed in `chord` reads pressed.
pub fn chord_held(raw: &[SwitchState], chord: &[usize]) -> bool {
    !chord.is_empty()
        && chord
            .iter()
            .all(|&i| raw.get(i).is_some_and(|s| s.is_pressed()))
}

#[cfg(test)]
mod test {
    use super::*;
    use SwitchState::{Pressed as P, Released as R};

    #[test]
    fn any_pressed_is_an_or_over_raw_reads() {
        assert!(!any_pressed(&[R, R, R, R, R]));
        assert!(any_pressed(&[R, R, R, R, P]));
        assert!(any_pressed(&[P, R, P, R, R]));
        assert!(any_pressed(&[P, P, P, P, P]));
        assert!(!any_pressed(&[]));
    }

    #[test]
    fn chord_needs_every_member() {
        assert!(chord_held(&[P, R, R, R, P], &[0, 4]));
        assert!(chord_held(&[P, P, P, P, P], &[0, 4]));
        assert!(!chord_held(&[P, R, R, R, R], &[0, 4]));
        assert!(!chord_held(&[R, R, R, R, P], &[0, 4]));
    }

    #[test]
    fn chord_out_of_range_or_empty_never_holds() {
        assert!(!chord_held(&[P, P], &[0, 4]));
        assert!(!chord_held(&[P, P, P, P, P], &[]));
    }
}
