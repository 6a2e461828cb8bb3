use super::decode_text_string;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// One bookmark, flattened. `level` 0 is the top of the outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub title: String,
    pub page: Option<u32>,
    pub level: u32,
}

/// Read the document outline in reading order: each entry precedes its
/// children, siblings follow their `/Next` chain. Pages are 0-based.
///
/// A document without `/Outlines` yields an empty list.
pub fn read_outline(doc: &Document, pages: &HashMap<ObjectId, u32>) -> Vec<OutlineEntry> {
    let Ok(catalog) = doc.catalog() else {
        return Vec::new();
    };
    let Some(outlines) = catalog
        .get(b"Outlines")
        .ok()
        .and_then(|o| as_dict(doc, o))
    else {
        return Vec::new();
    };
    let Ok(Object::Reference(first)) = outlines.get(b"First") else {
        return Vec::new();
    };

    let mut walker = OutlineWalker {
        doc,
        pages,
        visited: HashSet::new(),
        entries: Vec::new(),
    };
    walker.walk(*first, 0);
    walker.entries
}

struct OutlineWalker<'a> {
    doc: &'a Document,
    pages: &'a HashMap<ObjectId, u32>,
    visited: HashSet<ObjectId>,
    entries: Vec<OutlineEntry>,
}

impl<'a> OutlineWalker<'a> {
    fn walk(&mut self, first: ObjectId, level: u32) {
        let doc = self.doc;
        let mut next = Some(first);

        while let Some(id) = next {
            if !self.visited.insert(id) {
                debug!("Outline item {:?} visited twice, stopping", id);
                break;
            }
            let Ok(item) = doc.get_dictionary(id) else {
                break;
            };

            let title = match item.get(b"Title").map(|t| deref(doc, t)) {
                Ok(Object::String(bytes, _)) => decode_text_string(bytes),
                _ => String::new(),
            };
            let title = if title.is_empty() {
                "Untitled".to_string()
            } else {
                title
            };

            let page = self.item_page(item);
            self.entries.push(OutlineEntry { title, page, level });

            if let Ok(Object::Reference(child)) = item.get(b"First") {
                self.walk(*child, level + 1);
            }

            next = match item.get(b"Next") {
                Ok(Object::Reference(r)) => Some(*r),
                _ => None,
            };
        }
    }

    fn item_page(&self, item: &Dictionary) -> Option<u32> {
        if let Ok(dest) = item.get(b"Dest") {
            return self.resolve(dest, 0);
        }

        let action = item.get(b"A").ok().and_then(|a| as_dict(self.doc, a))?;
        match action.get(b"S") {
            Ok(Object::Name(kind)) if kind == b"GoTo" => {
                action.get(b"D").ok().and_then(|d| self.resolve(d, 0))
            }
            _ => None,
        }
    }

    fn resolve(&self, dest: &Object, depth: u32) -> Option<u32> {
        // Named destinations can point at other names
        if depth > 8 {
            return None;
        }

        match deref(self.doc, dest) {
            Object::Array(arr) => self.page_of(arr.first()?),
            Object::String(name, _) | Object::Name(name) => {
                let target = self.lookup_name(name)?;
                self.resolve(target, depth + 1)
            }
            // Entries of the legacy /Dests dictionary may wrap the array in /D
            Object::Dictionary(dict) => self.resolve(dict.get(b"D").ok()?, depth + 1),
            _ => None,
        }
    }

    fn page_of(&self, target: &Object) -> Option<u32> {
        match target {
            Object::Reference(id) => self.pages.get(id).copied(),
            // Some producers write a page index instead of a page reference
            Object::Integer(n) => u32::try_from(*n).ok(),
            _ => None,
        }
    }

    fn lookup_name(&self, name: &[u8]) -> Option<&'a Object> {
        let catalog = self.doc.catalog().ok()?;

        let tree = catalog
            .get(b"Names")
            .ok()
            .and_then(|n| as_dict(self.doc, n))
            .and_then(|names| names.get(b"Dests").ok())
            .and_then(|d| as_dict(self.doc, d));
        if let Some(tree) = tree {
            let mut seen = HashSet::new();
            if let Some(found) = search_name_tree(self.doc, tree, name, &mut seen) {
                return Some(found);
            }
        }

        catalog
            .get(b"Dests")
            .ok()
            .and_then(|d| as_dict(self.doc, d))
            .and_then(|dests| dests.get(name).ok())
    }
}

fn search_name_tree<'a>(
    doc: &'a Document,
    node: &'a Dictionary,
    name: &[u8],
    seen: &mut HashSet<ObjectId>,
) -> Option<&'a Object> {
    if let Ok(Object::Array(pairs)) = node.get(b"Names").map(|n| deref(doc, n)) {
        for pair in pairs.chunks(2) {
            if let [Object::String(key, _), value] = pair {
                if key == name {
                    return Some(value);
                }
            }
        }
    }

    if let Ok(Object::Array(kids)) = node.get(b"Kids").map(|k| deref(doc, k)) {
        for kid in kids {
            let Object::Reference(kid_id) = kid else {
                continue;
            };
            if !seen.insert(*kid_id) {
                continue;
            }
            if let Ok(child) = doc.get_dictionary(*kid_id) {
                if let Some(found) = search_name_tree(doc, child, name, seen) {
                    return Some(found);
                }
            }
        }
    }

    None
}

/// Follow a single indirect reference, if any.
fn deref<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

fn as_dict<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Dictionary> {
    match deref(doc, obj) {
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}
