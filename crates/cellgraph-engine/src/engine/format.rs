/// Render a number in canonical form.
///
/// This is the shortest text that parses back to the same `f64`, with no
/// exponent and no insignificant digits ("5.0000" -> "5", "4e-2" -> "0.04").
/// Formula canonical strings and cell string forms both go through here.
pub fn format_number(n: f64) -> String {
    n.to_string()
}
