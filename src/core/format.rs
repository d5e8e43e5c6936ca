/// Format whole euros with space-grouped thousands, e.g. `94 111 €`.
///
/// Approximates the pt-PT euro style: it uses an ASCII space as the group
/// separator and groups four-digit amounts too (`1 000 €`), where pt-PT
/// locale formatting writes a no-break space and leaves `1000 €` ungrouped.
pub fn format_currency(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    if amount < 0 {
        format!("-{grouped} €")
    } else {
        format!("{grouped} €")
    }
}
