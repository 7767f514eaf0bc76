//! The register name table

use crate::reg::{Location, Register, View};
use crate::{Error, Result};
use std::collections::HashMap;

/// Every register spelling the assembler accepts, and the view it names.
///
/// The legacy registers have all five views. The extended registers have no
/// spelling for their high byte, though the view itself still exists.
static SPELLINGS: [(&str, Register, View); 72] = [
    ("rax", Register::A, View::Quad),
    ("eax", Register::A, View::Double),
    ("ax", Register::A, View::Word),
    ("ah", Register::A, View::High),
    ("al", Register::A, View::Low),
    ("rbx", Register::B, View::Quad),
    ("ebx", Register::B, View::Double),
    ("bx", Register::B, View::Word),
    ("bh", Register::B, View::High),
    ("bl", Register::B, View::Low),
    ("rcx", Register::C, View::Quad),
    ("ecx", Register::C, View::Double),
    ("cx", Register::C, View::Word),
    ("ch", Register::C, View::High),
    ("cl", Register::C, View::Low),
    ("rdx", Register::D, View::Quad),
    ("edx", Register::D, View::Double),
    ("dx", Register::D, View::Word),
    ("dh", Register::D, View::High),
    ("dl", Register::D, View::Low),
    ("rsi", Register::SI, View::Quad),
    ("esi", Register::SI, View::Double),
    ("si", Register::SI, View::Word),
    ("sih", Register::SI, View::High),
    ("sil", Register::SI, View::Low),
    ("rdi", Register::DI, View::Quad),
    ("edi", Register::DI, View::Double),
    ("di", Register::DI, View::Word),
    ("dih", Register::DI, View::High),
    ("dil", Register::DI, View::Low),
    ("rbp", Register::BP, View::Quad),
    ("ebp", Register::BP, View::Double),
    ("bp", Register::BP, View::Word),
    ("bph", Register::BP, View::High),
    ("bpl", Register::BP, View::Low),
    ("rsp", Register::SP, View::Quad),
    ("esp", Register::SP, View::Double),
    ("sp", Register::SP, View::Word),
    ("sph", Register::SP, View::High),
    ("spl", Register::SP, View::Low),
    ("r8", Register::R8, View::Quad),
    ("r8d", Register::R8, View::Double),
    ("r8w", Register::R8, View::Word),
    ("r8b", Register::R8, View::Low),
    ("r9", Register::R9, View::Quad),
    ("r9d", Register::R9, View::Double),
    ("r9w", Register::R9, View::Word),
    ("r9b", Register::R9, View::Low),
    ("r10", Register::R10, View::Quad),
    ("r10d", Register::R10, View::Double),
    ("r10w", Register::R10, View::Word),
    ("r10b", Register::R10, View::Low),
    ("r11", Register::R11, View::Quad),
    ("r11d", Register::R11, View::Double),
    ("r11w", Register::R11, View::Word),
    ("r11b", Register::R11, View::Low),
    ("r12", Register::R12, View::Quad),
    ("r12d", Register::R12, View::Double),
    ("r12w", Register::R12, View::Word),
    ("r12b", Register::R12, View::Low),
    ("r13", Register::R13, View::Quad),
    ("r13d", Register::R13, View::Double),
    ("r13w", Register::R13, View::Word),
    ("r13b", Register::R13, View::Low),
    ("r14", Register::R14, View::Quad),
    ("r14d", Register::R14, View::Double),
    ("r14w", Register::R14, View::Word),
    ("r14b", Register::R14, View::Low),
    ("r15", Register::R15, View::Quad),
    ("r15d", Register::R15, View::Double),
    ("r15w", Register::R15, View::Word),
    ("r15b", Register::R15, View::Low),
];

lazy_static! {
    static ref BY_NAME: HashMap<&'static str, Location> = SPELLINGS
        .iter()
        .map(|(name, register, view)| (*name, Location::new(*register, *view)))
        .collect();
}

/// Resolve a register spelling to the view it names.
///
/// The `%` sigil is optional, so both `%eax` and `eax` resolve to the low four
/// bytes of `rax`. Matching is exact and case-sensitive.
pub fn resolve_view(name: &str) -> Result<Location> {
    let bare = name.strip_prefix('%').unwrap_or(name);

    BY_NAME
        .get(bare)
        .copied()
        .ok_or_else(|| Error::UnknownRegisterName(name.to_string()))
}

/// The assembler spelling of a location, without the `%` sigil, if it has one.
pub fn spelling(location: Location) -> Option<&'static str> {
    SPELLINGS
        .iter()
        .find(|(_, register, view)| *register == location.register() && *view == location.view())
        .map(|(name, _, _)| *name)
}
