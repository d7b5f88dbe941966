//! Quoting values for PowerShell scripts.

/// Escape a value for use inside a single-quoted PowerShell string.
///
/// Single-quoted strings are literal in PowerShell; the only character that
/// needs escaping is `'` itself, written as `''`.
pub fn escape_powershell_string(value: &str) -> String {
    value.replace('\'', "''")
}

/// Escape and wrap a value in single quotes.
pub fn quote(value: &str) -> String {
    format!("'{}'", escape_powershell_string(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_value_unchanged() {
        assert_eq!(escape_powershell_string(r"C:\hes\bin"), r"C:\hes\bin");
    }

    #[test]
    fn single_quotes_are_doubled() {
        assert_eq!(escape_powershell_string("O'Brien's"), "O''Brien''s");
    }

    #[test]
    fn other_metacharacters_pass_through() {
        assert_eq!(escape_powershell_string("$env:TEMP `n"), "$env:TEMP `n");
    }

    #[test]
    fn quote_wraps() {
        assert_eq!(quote("it's"), "'it''s'");
    }
}
