use crate::layout::Rules;

pub(crate) fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Splits `<decimal><code>` tokens such as `2.00ABC-1` into `2.00` and `ABC-1`.
pub(crate) fn split_fused_tokens(tokens: Vec<String>, rules: &Rules<'_>) -> Vec<String> {
    let mut out = Vec::with_capacity(tokens.len());
    for token in tokens {
        match rules.fused_token.captures(&token) {
            Some(capture) => {
                out.push(capture[1].to_string());
                out.push(capture[2].to_string());
            }
            None => out.push(token),
        }
    }
    out
}

/// Rejoins a decimal whose trailing digits were emitted as the next token,
/// e.g. `25.0` `0` becomes `25.00`. Pairs only; never transitive.
pub(crate) fn merge_split_numbers(tokens: Vec<String>, rules: &Rules<'_>) -> Vec<String> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut iter = tokens.into_iter().peekable();
    while let Some(token) = iter.next() {
        let tail =
            iter.next_if(|next| rules.partial_decimal.is_match(&token) && rules.digits.is_match(next));
        match tail {
            Some(next) => out.push(token + &next),
            None => out.push(token),
        }
    }
    out
}

pub(crate) fn repair_tokens(tokens: Vec<String>, rules: &Rules<'_>) -> Vec<String> {
    merge_split_numbers(split_fused_tokens(tokens, rules), rules)
}

/// Tokenizes and repairs one data line.
pub(crate) fn tokenize_row(line: &str, rules: &Rules<'_>) -> Vec<String> {
    repair_tokens(tokenize(line), rules)
}
