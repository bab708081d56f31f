//! Unit catalog.
//!
//! Every unit kind with its movement and combat properties, stored in a
//! compile-time table indexed by the `UnitKind` discriminant.

/// Number of unit kinds.
pub const UNIT_KIND_COUNT: usize = 7;

/// The kind of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum UnitKind {
    Hq = 0,
    Infantry = 1,
    ArmoredInfantry = 2,
    AirborneInfantry = 3,
    Artillery = 4,
    ArmoredArtillery = 5,
    HeavyArtillery = 6,
}

/// All unit kinds in catalog order.
pub const ALL_UNIT_KINDS: [UnitKind; UNIT_KIND_COUNT] = [
    UnitKind::Hq,
    UnitKind::Infantry,
    UnitKind::ArmoredInfantry,
    UnitKind::AirborneInfantry,
    UnitKind::Artillery,
    UnitKind::ArmoredArtillery,
    UnitKind::HeavyArtillery,
];

/// Broad role of a unit kind, used by the capture rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitClass {
    Command,
    Infantry,
    Artillery,
}

/// Static properties of a unit kind.
pub struct UnitInfo {
    pub letter: char,
    pub name: &'static str,
    pub class: UnitClass,
    /// Squares per step in a straight line (1 or 2).
    pub mobility: u8,
    pub can_capture: bool,
    /// Forward bombardment reach in squares, for artillery.
    pub bombard_range: Option<u8>,
    pub parachute: bool,
}

/// The catalog, indexed by `UnitKind as usize`.
pub static UNIT_INFO: [UnitInfo; UNIT_KIND_COUNT] = [
    UnitInfo { letter: 'h', name: "hq", class: UnitClass::Command, mobility: 1, can_capture: false, bombard_range: None, parachute: false },
    UnitInfo { letter: 'i', name: "infantry", class: UnitClass::Infantry, mobility: 1, can_capture: true, bombard_range: None, parachute: false },
    UnitInfo { letter: 't', name: "armored infantry", class: UnitClass::Infantry, mobility: 2, can_capture: true, bombard_range: None, parachute: false },
    UnitInfo { letter: 'p', name: "airborne infantry", class: UnitClass::Infantry, mobility: 1, can_capture: true, bombard_range: None, parachute: true },
    UnitInfo { letter: 'a', name: "artillery", class: UnitClass::Artillery, mobility: 1, can_capture: false, bombard_range: Some(2), parachute: false },
    UnitInfo { letter: 's', name: "armored artillery", class: UnitClass::Artillery, mobility: 2, can_capture: false, bombard_range: Some(2), parachute: false },
    UnitInfo { letter: 'g', name: "heavy artillery", class: UnitClass::Artillery, mobility: 1, can_capture: false, bombard_range: Some(3), parachute: false },
];

impl UnitKind {
    pub fn info(self) -> &'static UnitInfo {
        &UNIT_INFO[self as usize]
    }

    /// Lowercase notation letter.
    pub fn letter(self) -> char {
        self.info().letter
    }

    pub fn mobility(self) -> u8 {
        self.info().mobility
    }

    pub fn can_capture(self) -> bool {
        self.info().can_capture
    }

    pub fn bombard_range(self) -> Option<u8> {
        self.info().bombard_range
    }

    pub fn has_parachute(self) -> bool {
        self.info().parachute
    }

    pub fn is_artillery(self) -> bool {
        self.info().class == UnitClass::Artillery
    }

    pub fn is_infantry(self) -> bool {
        self.info().class == UnitClass::Infantry
    }

    /// True for kinds that can sit in a reserve fleet (everything but the HQ).
    pub fn is_reservable(self) -> bool {
        self != UnitKind::Hq
    }

    /// Parses a kind from its letter, in either case.
    pub fn from_letter(c: char) -> Option<UnitKind> {
        let lower = c.to_ascii_lowercase();
        ALL_UNIT_KINDS.into_iter().find(|k| k.letter() == lower)
    }
}
