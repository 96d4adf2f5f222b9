use crate::domain::{Item, PropertyMeta};

pub const SECRET_MASK: &str = "********";

/// One `(title, value)` row of an item's expanded view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionRow {
    pub key: String,
    pub title: String,
    pub value: String,
}

/// Two-column rendering of an item, one row per key in raw key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDescription {
    pub rows: Vec<DescriptionRow>,
}

impl ItemDescription {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Precomputed labels for one array item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDetails {
    pub name: String,
    pub description: ItemDescription,
}

impl ItemDetails {
    pub fn from_item(item: &Item, properties: &[PropertyMeta]) -> Self {
        Self {
            name: item_name(item, properties),
            description: item_description(item, properties),
        }
    }
}

/// `"{title}: {value}"` pairs joined by `" | "`, keys sorted lexicographically.
pub fn item_name(item: &Item, properties: &[PropertyMeta]) -> String {
    sorted_rows(item, properties)
        .map(|row| format!("{}: {}", row.title, row.value))
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn item_description(item: &Item, properties: &[PropertyMeta]) -> ItemDescription {
    ItemDescription {
        rows: sorted_rows(item, properties).collect(),
    }
}

fn sorted_rows<'a>(
    item: &'a Item,
    properties: &'a [PropertyMeta],
) -> impl Iterator<Item = DescriptionRow> + 'a {
    item.sorted_keys().into_iter().map(move |key| {
        let property = properties.iter().find(|property| property.field_key == key);
        let title = property
            .map(|property| property.display_title())
            .unwrap_or(key)
            .to_string();
        let raw = item.get(key).unwrap_or_default();
        let value = if property.is_some_and(|property| property.secret) {
            SECRET_MASK.to_string()
        } else {
            raw.to_string()
        };
        DescriptionRow {
            key: key.to_string(),
            title,
            value,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(pairs: &[(&str, &str)]) -> Item {
        pairs.iter().copied().collect()
    }

    #[test]
    fn name_sorts_keys_and_falls_back_to_key() {
        let name = item_name(&item(&[("b", "2"), ("a", "1")]), &[]);
        assert_eq!(name, "a: 1 | b: 2");
    }

    #[test]
    fn name_uses_metadata_title() {
        let properties = vec![PropertyMeta::new("a").with_title("Alpha")];
        assert_eq!(item_name(&item(&[("a", "x")]), &properties), "Alpha: x");
    }

    #[test]
    fn empty_item_yields_empty_name_and_rows() {
        let details = ItemDetails::from_item(&Item::new(), &[]);
        assert_eq!(details.name, "");
        assert!(details.description.is_empty());
    }

    #[test]
    fn order_follows_raw_keys_not_titles() {
        let properties = vec![
            PropertyMeta::new("a").with_title("Zulu"),
            PropertyMeta::new("b").with_title("Alpha"),
        ];
        let description = item_description(&item(&[("b", "2"), ("a", "1")]), &properties);
        let titles: Vec<_> = description.rows.iter().map(|row| row.title.as_str()).collect();
        assert_eq!(titles, vec!["Zulu", "Alpha"]);
        assert_eq!(
            item_name(&item(&[("b", "2"), ("a", "1")]), &properties),
            "Zulu: 1 | Alpha: 2"
        );
    }

    #[test]
    fn secret_values_are_masked() {
        let properties = vec![PropertyMeta::new("token").with_secret(true)];
        let details = ItemDetails::from_item(&item(&[("token", "abc")]), &properties);
        assert_eq!(details.name, format!("token: {SECRET_MASK}"));
        assert_eq!(details.description.rows[0].value, SECRET_MASK);
    }
}
