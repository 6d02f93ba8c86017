//! String and stack algorithms
//!
//! Strings travel through the trace as Unicode scalar values in
//! `array_state`. Both generators accept the empty string.

use super::codes_to_string;
use crate::errors::ValidationError;
use crate::recorder::Recorder;
use crate::registry::Params;
use crate::snapshot::{AuxiliaryState, Mark, PointerColor, Trace, TraceResult};

const OPENERS: [char; 3] = ['(', '[', '{'];

fn partner(close: char) -> Option<char> {
    match close {
        ')' => Some('('),
        ']' => Some('['),
        '}' => Some('{'),
        _ => None,
    }
}

fn to_char(code: i64) -> char {
    u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Stack-based bracket matcher over `()[]{}`.
///
/// The first closer without a partner, or the first mismatched pair, ends the
/// trace with `false`. Openers left on the stack at the end are flagged.
pub fn balanced_brackets(input: &[i64], _params: &Params) -> Result<Trace, ValidationError> {
    for (position, &code) in input.iter().enumerate() {
        let found = to_char(code);
        if !OPENERS.contains(&found) && partner(found).is_none() {
            return Err(ValidationError::InvalidBracket { found, position });
        }
    }

    let mut rec = Recorder::with_expression(input, codes_to_string(input));
    // (index, char code) of each unmatched opener
    let mut stack: Vec<(usize, i64)> = Vec::new();
    let mut matched: Vec<usize> = Vec::new();
    let items = |stack: &[(usize, i64)]| AuxiliaryState::Stack {
        items: stack.iter().map(|&(_, code)| code).collect(),
    };

    for (i, &code) in input.iter().enumerate() {
        let c = to_char(code);
        if OPENERS.contains(&c) {
            stack.push((i, code));
            rec.frame(input)
                .mark_all(matched.iter().copied(), Mark::Match)
                .mark(i, Mark::Current)
                .pointer(i, "i", PointerColor::Primary)
                .var("i", i)
                .var_changed("depth", stack.len())
                .aux(items(&stack))
                .emit(format!("Push '{}'", c));
            continue;
        }

        let Some((j, open_code)) = stack.pop() else {
            rec.frame(input)
                .mark_all(matched.iter().copied(), Mark::Match)
                .mark(i, Mark::Mismatch)
                .pointer(i, "i", PointerColor::Danger)
                .var("i", i)
                .var("depth", 0usize)
                .aux(items(&stack))
                .result(TraceResult::Boolean(false))
                .emit(format!("'{}' at {} has nothing to close", c, i));
            return Ok(rec.finish());
        };

        let open = to_char(open_code);
        rec.frame(input)
            .mark_all(matched.iter().copied(), Mark::Match)
            .compare(j, i)
            .pointer(j, "top", PointerColor::Secondary)
            .pointer(i, "i", PointerColor::Primary)
            .var("i", i)
            .var("depth", stack.len() + 1)
            .aux(items(&stack))
            .emit(format!("Does '{}' close '{}'?", c, open));

        if partner(c) != Some(open) {
            rec.frame(input)
                .mark_all(matched.iter().copied(), Mark::Match)
                .mark(j, Mark::Mismatch)
                .mark(i, Mark::Mismatch)
                .pointer(i, "i", PointerColor::Danger)
                .var("i", i)
                .aux(items(&stack))
                .result(TraceResult::Boolean(false))
                .emit(format!("'{}' cannot close '{}'", c, open));
            return Ok(rec.finish());
        }

        matched.push(j);
        matched.push(i);
        rec.frame(input)
            .mark_all(matched.iter().copied(), Mark::Match)
            .pointer(i, "i", PointerColor::Success)
            .var("i", i)
            .var_changed("depth", stack.len())
            .aux(items(&stack))
            .emit(format!("Pop: '{}' and '{}' match", open, c));
    }

    let frame = rec
        .frame(input)
        .mark_all(matched.iter().copied(), Mark::Match)
        .aux(items(&stack));
    if stack.is_empty() {
        frame
            .result(TraceResult::Boolean(true))
            .emit("Stack is empty: balanced");
    } else {
        frame
            .mark_all(stack.iter().map(|&(j, _)| j), Mark::Mismatch)
            .var("depth", stack.len())
            .result(TraceResult::Boolean(false))
            .emit(format!("{} opener(s) never closed", stack.len()));
    }
    Ok(rec.finish())
}

/// Swap characters from both ends toward the middle
pub fn reverse_string(input: &[i64], _params: &Params) -> Result<Trace, ValidationError> {
    let mut a = input.to_vec();
    let n = a.len();
    let mut rec = Recorder::new(input);

    if n > 1 {
        let (mut i, mut j) = (0, n - 1);
        while i < j {
            a.swap(i, j);
            rec.frame(&a)
                .mark_range(0..i, Mark::Sorted)
                .mark_range(j + 1..n, Mark::Sorted)
                .swap(i, j)
                .pointer(i, "left", PointerColor::Primary)
                .pointer(j, "right", PointerColor::Secondary)
                .var_changed("left", i)
                .var_changed("right", j)
                .emit(format!("Swap '{}' and '{}'", to_char(a[j]), to_char(a[i])));
            i += 1;
            j -= 1;
        }
    }

    let reversed = codes_to_string(&a);
    rec.frame(&a)
        .mark_range(0..n, Mark::Sorted)
        .result(TraceResult::Text(reversed.clone()))
        .emit(format!("Reversed: \"{}\"", reversed));
    Ok(rec.finish())
}
