use crate::core::constants::{CODE_LENGTH, SEPARATOR, SEPARATOR_LEVELS};
use crate::core::symbols::{symbol_at, symbol_position};
use crate::util::error::DigiPinError;

/// Removes every separator from a code.
pub fn strip_separators(code: &str) -> String {
    code.chars().filter(|&c| c != SEPARATOR).collect()
}

/// Resolves each symbol of `code` to its `(row, col)` grid position.
///
/// Separators are ignored wherever they appear. Scanning stops at the 11th
/// symbol, so oversized input is rejected without being read to the end.
/// Length is checked before the alphabet, so `"AB"` is an `InvalidLength`
/// and `"AAA-AAA-AAAA"` an `InvalidSymbol('A')`.
pub fn code_to_positions(code: &str) -> Result<[(usize, usize); CODE_LENGTH], DigiPinError> {
    let mut symbols = ['\0'; CODE_LENGTH];
    let mut len = 0;

    for symbol in code.chars().filter(|&c| c != SEPARATOR) {
        if len == CODE_LENGTH {
            return Err(DigiPinError::InvalidLength(CODE_LENGTH + 1));
        }
        symbols[len] = symbol;
        len += 1;
    }

    if len != CODE_LENGTH {
        return Err(DigiPinError::InvalidLength(len));
    }

    let mut positions = [(0, 0); CODE_LENGTH];
    for (slot, &symbol) in positions.iter_mut().zip(symbols.iter()) {
        *slot = symbol_position(symbol).ok_or(DigiPinError::InvalidSymbol(symbol))?;
    }

    Ok(positions)
}

/// Renders a valid code in its canonical `XXX-XXX-XXXX` form.
pub fn format_code(code: &str) -> Result<String, DigiPinError> {
    let positions = code_to_positions(code)?;

    let mut out = String::with_capacity(CODE_LENGTH + SEPARATOR_LEVELS.len());
    for (i, &(row, col)) in positions.iter().enumerate() {
        out.push(symbol_at(row, col));
        if SEPARATOR_LEVELS.contains(&(i + 1)) {
            out.push(SEPARATOR);
        }
    }
    Ok(out)
}
