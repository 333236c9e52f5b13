/// Write every item with `f`, putting `separator` between items that produced some output.
pub fn separated_by<T, F>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) where
    F: FnMut(&mut String, T),
{
    let mut len = out.len();
    for v in values {
        if out.len() > len {
            out.push_str(separator);
        }
        len = out.len();
        f(out, v);
    }
}

pub fn write_integer(out: &mut String, value: impl itoa::Integer) {
    let mut buffer = itoa::Buffer::new();
    out.push_str(buffer.format(value));
}

/// At most the first 497 bytes of `value`, cut on a char boundary.
pub fn truncated(value: &str) -> &str {
    let mut end = value.len().min(497);
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    value[..end].trim_end()
}

#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {
        format_args!(
            "{}{}",
            $crate::truncated(&$query),
            if $query.len() > 497 { "..." } else { "" },
        )
    };
}
