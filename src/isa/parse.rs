//! Reading instructions and operands from assembly text

use crate::isa::{Address, Instruction, Opcode, Operand, Scale};
use crate::maths::parse_integer;
use crate::reg::{resolve_view, Location};
use crate::{Error, Field, ParseError, Result};
use log::trace;

/// Where the scanner is within an instruction's text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Scan {
    Leading,
    Mnemonic,
    BeforeSource,
    Source,
    BeforeDestination,
    Destination,
    Trailing,
}

/// Split an instruction into its mnemonic, source, destination, and anything
/// left over after the destination.
///
/// Only a comma outside of parentheses ends the source operand, so the
/// commas of a memory operand stay with it.
fn split_fields(text: &str) -> (&str, &str, &str, &str) {
    let mut state = Scan::Leading;
    let mut depth = 0usize;
    let mut spans = [(0, 0); 3];
    let mut rest = text.len();

    for (i, c) in text.char_indices() {
        let end = i + c.len_utf8();

        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }

        state = match state {
            Scan::Leading if c.is_whitespace() => Scan::Leading,
            Scan::Leading => {
                spans[0] = (i, end);
                Scan::Mnemonic
            }
            Scan::Mnemonic if c.is_whitespace() => Scan::BeforeSource,
            Scan::Mnemonic => {
                spans[0].1 = end;
                Scan::Mnemonic
            }
            Scan::BeforeSource if c.is_whitespace() => Scan::BeforeSource,
            Scan::BeforeSource if c == ',' => Scan::BeforeDestination,
            Scan::BeforeSource => {
                spans[1] = (i, end);
                Scan::Source
            }
            Scan::Source if c == ',' && depth == 0 => Scan::BeforeDestination,
            Scan::Source => {
                spans[1].1 = end;
                Scan::Source
            }
            Scan::BeforeDestination if c.is_whitespace() || c == ',' => {
                Scan::BeforeDestination
            }
            Scan::BeforeDestination => {
                spans[2] = (i, end);
                Scan::Destination
            }
            Scan::Destination if c.is_whitespace() && depth == 0 => Scan::Trailing,
            Scan::Destination => {
                spans[2].1 = end;
                Scan::Destination
            }
            Scan::Trailing if c.is_whitespace() => Scan::Trailing,
            Scan::Trailing => {
                rest = i;
                break;
            }
        };
    }

    let field = move |(start, end): (usize, usize)| text[start..end].trim();

    (
        field(spans[0]),
        field(spans[1]),
        field(spans[2]),
        text[rest..].trim(),
    )
}

/// Parse one instruction slot.
///
/// The text is `<mnemonic> <src>, <dst>`, where either operand may be
/// missing. Fields are checked in order, so the error reports the first
/// field that failed.
pub fn parse_instruction(text: &str) -> std::result::Result<Instruction, ParseError> {
    let (mnemonic, src, dst, rest) = split_fields(text);

    let opcode: Opcode = mnemonic
        .parse()
        .map_err(|e| ParseError::new(Field::Mnemonic, e))?;
    let src = parse_operand(src).map_err(|e| ParseError::new(Field::Source, e))?;
    let dst = parse_operand(dst).map_err(|e| ParseError::new(Field::Destination, e))?;

    if !rest.is_empty() {
        return Err(ParseError::new(
            Field::Destination,
            Error::MalformedInstruction(rest.to_string()),
        ));
    }

    let instruction = Instruction::new(opcode, src, dst);

    trace!(
        "`{}` => {} {} ({}), {} ({})",
        text.trim(),
        opcode,
        instruction.src(),
        instruction.src().kind(),
        instruction.dst(),
        instruction.dst().kind()
    );

    Ok(instruction)
}

/// Parse a register that must carry the `%` sigil.
fn parse_register(text: &str, operand: &str) -> Result<Location> {
    if !text.starts_with('%') {
        return Err(Error::MalformedOperand(operand.to_string()));
    }

    resolve_view(text)
}

fn parse_part<T, F>(text: &str, parse: F) -> Result<Option<T>>
where
    F: FnOnce(&str) -> Result<T>,
{
    let text = text.trim();

    if text.is_empty() {
        Ok(None)
    } else {
        parse(text).map(Some)
    }
}

/// Parse `offset(base,index,scale)`, or a bare offset.
fn parse_memory(text: &str) -> Result<Address> {
    let malformed = || Error::MalformedOperand(text.to_string());

    let open = match text.find('(') {
        Some(open) => open,
        None => return Ok(Address::absolute(parse_integer(text)?)),
    };

    let group = text[open + 1..].strip_suffix(')').ok_or_else(malformed)?;
    if group.contains(|c: char| c == '(' || c == ')') {
        return Err(malformed());
    }

    let offset = parse_part(&text[..open], parse_integer)?;
    let parts: Vec<&str> = group.split(',').collect();

    let (base, index, scale) = match parts.as_slice() {
        [base] => (*base, "", None),
        [base, index] => (*base, *index, None),
        [base, index, scale] => (*base, *index, Some(*scale)),
        _ => return Err(malformed()),
    };

    let scale = match scale {
        Some(scale) if scale.trim().is_empty() => return Err(malformed()),
        Some(scale) => Some(scale.parse::<Scale>()?),
        None => None,
    };
    let base = parse_part(base, |r| parse_register(r, text))?;
    let index = parse_part(index, |r| parse_register(r, text))?;

    Address::new(offset, base, index, scale).ok_or_else(malformed)
}

/// Parse a single operand.
///
/// Empty text is the empty operand. Otherwise the first character picks the
/// form: `$` for an immediate, `%` for a register, and anything else for a
/// memory reference.
pub fn parse_operand(text: &str) -> Result<Operand> {
    let text = text.trim();

    if text.is_empty() {
        Ok(Operand::Empty)
    } else if let Some(value) = text.strip_prefix('$') {
        Ok(Operand::Immediate(parse_integer(value)?))
    } else if text.starts_with('%') {
        Ok(Operand::Register(resolve_view(text)?))
    } else {
        Ok(Operand::Memory(parse_memory(text)?))
    }
}
