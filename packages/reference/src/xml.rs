//! XML utility functions for reading NLSC list responses.

use std::collections::HashMap;

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use sectcode_reference::xml::get_tag_name;
///
/// let xml = r#"<countyItems><countyItem/></countyItems>"#;
/// let doc = Document::parse(xml).unwrap();
/// let item = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(item), "countyItem");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Get the text content of a node, trimmed.
///
/// Returns an empty string if the node has no text.
pub fn get_text(node: Node<'_, '_>) -> String {
    node.text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Get all element children of a node.
///
/// Text nodes, comments and processing instructions are skipped.
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Collect the element children of an item as a tag -> trimmed text map.
///
/// Later duplicates of a tag are ignored.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use sectcode_reference::xml::item_fields;
///
/// let xml = r#"<countyItem><countycode>B</countycode><countyname> 臺中市 </countyname></countyItem>"#;
/// let doc = Document::parse(xml).unwrap();
/// let fields = item_fields(doc.root_element());
/// assert_eq!(fields["countycode"], "B");
/// assert_eq!(fields["countyname"], "臺中市");
/// ```
pub fn item_fields<'a>(node: Node<'a, '_>) -> HashMap<&'a str, String> {
    let mut fields = HashMap::new();
    for child in element_children(node) {
        fields
            .entry(get_tag_name(child))
            .or_insert_with(|| get_text(child));
    }
    fields
}
