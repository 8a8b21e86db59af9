//! Signal strings: `name`, `name[hi:lo]`, `name[i]` and `<width>'b<bits>`.

use strata_common::{Interner, LogicVec};
use strata_ir::names::{escape_id, unescape_id};
use strata_ir::{Module, SigChunk, SigSpec};

use crate::error::NetlistError;
use crate::format::ConnectionJson;

/// A parsed signal string, before wire lookup.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SignalText<'a> {
    Whole(&'a str),
    Slice { wire: &'a str, hi: u32, lo: u32 },
    Const(LogicVec),
}

/// Parses a `<width>'b<bits>` literal. The bit count must equal the width.
pub(crate) fn parse_logic_literal(text: &str) -> Option<LogicVec> {
    let (width, bits) = text.split_once("'b")?;
    if width.is_empty() || !width.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let width: u32 = width.parse().ok()?;
    let value = LogicVec::from_binary_str(bits)?;
    (value.width() == width).then_some(value)
}

pub(crate) fn parse_signal(text: &str) -> Option<SignalText<'_>> {
    if let Some(value) = parse_logic_literal(text) {
        return Some(SignalText::Const(value));
    }
    let Some(inner) = text.strip_suffix(']') else {
        return (!text.is_empty()).then_some(SignalText::Whole(text));
    };
    let open = inner.rfind('[')?;
    let wire = &inner[..open];
    if wire.is_empty() {
        return None;
    }
    let range = &inner[open + 1..];
    let (hi, lo) = match range.split_once(':') {
        Some((hi, lo)) => (hi.trim().parse().ok()?, lo.trim().parse().ok()?),
        None => {
            let bit = range.trim().parse().ok()?;
            (bit, bit)
        }
    };
    (hi >= lo).then_some(SignalText::Slice { wire, hi, lo })
}

fn signal_to_sigspec(
    text: &str,
    module: &Module,
    module_name: &str,
    interner: &Interner,
) -> Result<SigSpec, NetlistError> {
    let parsed = parse_signal(text).ok_or_else(|| NetlistError::BadSignal {
        module: module_name.to_string(),
        text: text.to_string(),
    })?;
    let (name, range) = match parsed {
        SignalText::Const(value) => return Ok(SigSpec::constant(value)),
        SignalText::Whole(name) => (name, None),
        SignalText::Slice { wire, hi, lo } => (wire, Some((hi, lo))),
    };
    let wire = interner
        .get(&escape_id(name))
        .and_then(|id| module.wires.get(&id))
        .ok_or_else(|| NetlistError::UnknownWire {
            module: module_name.to_string(),
            wire: name.to_string(),
        })?;
    match range {
        None => Ok(SigSpec::from_wire(wire)),
        Some((hi, lo)) if hi < wire.width => {
            Ok(SigSpec::wire_slice(wire.name, lo, hi - lo + 1))
        }
        Some((hi, lo)) => Err(NetlistError::RangeOutOfBounds {
            module: module_name.to_string(),
            wire: name.to_string(),
            hi,
            lo,
            width: wire.width,
        }),
    }
}

/// Converts a connection to a signal. List parts are most significant first.
pub(crate) fn connection_to_sigspec(
    conn: &ConnectionJson,
    module: &Module,
    module_name: &str,
    interner: &Interner,
) -> Result<SigSpec, NetlistError> {
    match conn {
        ConnectionJson::Single(text) => signal_to_sigspec(text, module, module_name, interner),
        ConnectionJson::Concat(parts) => {
            let mut sig = SigSpec::new();
            for part in parts.iter().rev() {
                sig.append(signal_to_sigspec(part, module, module_name, interner)?);
            }
            Ok(sig)
        }
    }
}

fn chunk_to_text(chunk: &SigChunk, module: &Module, interner: &Interner) -> String {
    match chunk {
        SigChunk::Const(value) => format!("{}'b{value}", value.width()),
        SigChunk::Wire {
            wire,
            offset,
            width,
        } => {
            let name = unescape_id(interner.resolve(*wire));
            let full = module.wires.get(wire).map(|w| w.width);
            if *offset == 0 && full == Some(*width) {
                name.to_string()
            } else if *width == 1 {
                format!("{name}[{offset}]")
            } else {
                format!("{name}[{}:{offset}]", offset + width - 1)
            }
        }
    }
}

/// Converts a signal back to its connection form.
pub(crate) fn sigspec_to_connection(
    sig: &SigSpec,
    module: &Module,
    interner: &Interner,
) -> ConnectionJson {
    let mut parts: Vec<String> = sig
        .chunks()
        .iter()
        .map(|chunk| chunk_to_text(chunk, module, interner))
        .collect();
    if parts.len() == 1 {
        ConnectionJson::Single(parts.remove(0))
    } else {
        parts.reverse();
        ConnectionJson::Concat(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_common::Logic;
    use strata_ir::Wire;

    fn module_with_bus(interner: &Interner) -> Module {
        let mut m = Module::new(interner.get_or_intern("\\top"));
        m.add_wire(Wire::new(interner.get_or_intern("\\bus"), 8));
        m.add_wire(Wire::new(interner.get_or_intern("\\a"), 1));
        m
    }

    #[test]
    fn parse_shapes() {
        assert_eq!(parse_signal("bus"), Some(SignalText::Whole("bus")));
        assert_eq!(
            parse_signal("bus[7:4]"),
            Some(SignalText::Slice { wire: "bus", hi: 7, lo: 4 })
        );
        assert_eq!(
            parse_signal("bus[3]"),
            Some(SignalText::Slice { wire: "bus", hi: 3, lo: 3 })
        );
        let Some(SignalText::Const(v)) = parse_signal("4'b10x1") else {
            panic!("expected constant");
        };
        assert_eq!(v.width(), 4);
        assert_eq!(v.get(1), Logic::X);
        assert_eq!(v.get(3), Logic::One);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_signal(""), None);
        assert_eq!(parse_signal("bus[2:5]"), None);
        assert_eq!(parse_signal("[3]"), None);
        assert_eq!(parse_signal("bus[a]"), None);
    }

    #[test]
    fn literal_width_must_match() {
        assert!(parse_logic_literal("3'b10").is_none());
        assert!(parse_logic_literal("2'b10").is_some());
        assert!(parse_logic_literal("x'b10").is_none());
        assert!(parse_logic_literal("plain").is_none());
    }

    #[test]
    fn concat_is_msb_first() {
        let interner = Interner::new();
        let m = module_with_bus(&interner);
        let conn = ConnectionJson::Concat(vec!["a".into(), "bus[3:0]".into()]);
        let sig = connection_to_sigspec(&conn, &m, "top", &interner).unwrap();
        assert_eq!(sig.width(), 5);
        let bus = interner.get_or_intern("\\bus");
        assert_eq!(
            sig.chunks()[0],
            SigChunk::Wire { wire: bus, offset: 0, width: 4 }
        );
        assert_eq!(sigspec_to_connection(&sig, &m, &interner), conn);
    }

    #[test]
    fn out_of_range_slice() {
        let interner = Interner::new();
        let m = module_with_bus(&interner);
        let conn = ConnectionJson::Single("bus[8]".into());
        let err = connection_to_sigspec(&conn, &m, "top", &interner).unwrap_err();
        assert!(matches!(err, NetlistError::RangeOutOfBounds { width: 8, .. }));
    }

    #[test]
    fn unknown_wire() {
        let interner = Interner::new();
        let m = module_with_bus(&interner);
        let conn = ConnectionJson::Single("nope".into());
        let err = connection_to_sigspec(&conn, &m, "top", &interner).unwrap_err();
        assert!(matches!(err, NetlistError::UnknownWire { ref wire, .. } if wire == "nope"));
    }

    #[test]
    fn whole_wire_and_bit_written_compactly() {
        let interner = Interner::new();
        let m = module_with_bus(&interner);
        let bus = interner.get_or_intern("\\bus");
        let whole = SigSpec::wire_slice(bus, 0, 8);
        assert_eq!(
            sigspec_to_connection(&whole, &m, &interner),
            ConnectionJson::Single("bus".into())
        );
        let bit = SigSpec::wire_slice(bus, 5, 1);
        assert_eq!(
            sigspec_to_connection(&bit, &m, &interner),
            ConnectionJson::Single("bus[5]".into())
        );
    }
}
