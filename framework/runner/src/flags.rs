use itertools::Itertools;

/// Turn comma separated lists into repeated `--{flag} {value}` pairs.
///
/// Values from all lists are merged, keeping the first occurrence of each. Blank entries are
/// dropped so an empty flag value is never passed on.
pub fn create_flags<'a, I>(flag: &str, lists: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    lists
        .into_iter()
        .flat_map(|list| list.split(','))
        .filter(|value| !value.is_empty())
        .unique()
        .flat_map(|value| [format!("--{flag}"), value.to_string()])
        .collect()
}
