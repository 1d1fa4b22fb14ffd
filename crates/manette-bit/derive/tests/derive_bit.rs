use manette_bit_derive::Bit;
use manette_bit_mask::{Bitable, Bitmask};

#[derive(Bit, Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Pad {
    A,
    B,
    Left,
    Down,
}

#[test]
fn bits_follow_declaration_order() {
    assert_eq!(Pad::A.bit(), 0x1);
    assert_eq!(Pad::B.bit(), 0x2);
    assert_eq!(Pad::Left.bit(), 0x4);
    assert_eq!(Pad::Down.bit(), 0x8);
}

#[test]
fn index_matches_bit_position() {
    for pad in [Pad::A, Pad::B, Pad::Left, Pad::Down] {
        assert_eq!(pad.bit(), 1u64 << pad.index());
    }
}

#[test]
fn derived_flags_combine_in_a_mask() {
    let mask = Bitmask::new(&[Pad::A, Pad::Down]);
    assert_eq!(mask.bits(), 0x9);
    assert!(mask.contains(Pad::Down));
    assert!(!mask.contains(Pad::Left));
}
