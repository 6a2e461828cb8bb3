//! Synthetic PDFs for tests.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use std::path::{Path, PathBuf};

/// Build a document with `pages` pages, each showing "Page N", and a flat
/// outline of `(title, 0-based page)` bookmarks. Returns the written path.
pub fn build_pdf(dir: &Path, name: &str, pages: u32, bookmarks: &[(&str, u32)]) -> PathBuf {
    let (mut doc, page_ids) = build_pages(pages);
    let items: Vec<OutlineSpec> = bookmarks
        .iter()
        .map(|(title, page)| OutlineSpec::dest(title, page_ids[*page as usize]))
        .collect();
    attach_outline(&mut doc, &items);
    save(doc, dir, name)
}

/// Build a document without an outline whose pages show the given lines,
/// top to bottom.
pub fn build_pdf_with_text(dir: &Path, name: &str, pages: &[&[&str]]) -> PathBuf {
    let lines: Vec<Vec<String>> = pages
        .iter()
        .map(|page| page.iter().map(|line| line.to_string()).collect())
        .collect();
    let (doc, _) = build_text_pages(&lines);
    save(doc, dir, name)
}

/// Build a document with an arbitrary outline tree.
pub fn build_pdf_with_outline(
    dir: &Path,
    name: &str,
    pages: u32,
    outline: impl FnOnce(&[ObjectId]) -> Vec<OutlineSpec>,
) -> PathBuf {
    let (mut doc, page_ids) = build_pages(pages);
    let items = outline(&page_ids);
    attach_outline(&mut doc, &items);
    save(doc, dir, name)
}

pub struct OutlineSpec {
    pub title: Object,
    pub target: Option<Object>,
    pub use_action: bool,
    pub children: Vec<OutlineSpec>,
}

impl OutlineSpec {
    pub fn dest(title: &str, page: ObjectId) -> Self {
        OutlineSpec {
            title: Object::string_literal(title),
            target: Some(fit_dest(page)),
            use_action: false,
            children: Vec::new(),
        }
    }

    pub fn goto(title: &str, page: ObjectId) -> Self {
        OutlineSpec {
            use_action: true,
            ..OutlineSpec::dest(title, page)
        }
    }

    pub fn dangling(title: &str) -> Self {
        OutlineSpec {
            title: Object::string_literal(title),
            target: None,
            use_action: false,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<OutlineSpec>) -> Self {
        self.children = children;
        self
    }
}

pub fn fit_dest(page: ObjectId) -> Object {
    Object::Array(vec![Object::Reference(page), "Fit".into()])
}

fn build_pages(pages: u32) -> (Document, Vec<ObjectId>) {
    let lines: Vec<Vec<String>> = (1..=pages).map(|n| vec![format!("Page {}", n)]).collect();
    build_text_pages(&lines)
}

fn build_text_pages(pages: &[Vec<String>]) -> (Document, Vec<ObjectId>) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut page_ids = Vec::new();
    for lines in pages {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), Object::Integer(12)]),
            Operation::new("Td", vec![Object::Integer(72), Object::Integer(720)]),
        ];
        for (i, line) in lines.iter().enumerate() {
            // Each line sits two font sizes below the previous one
            if i > 0 {
                operations.push(Operation::new(
                    "Td",
                    vec![Object::Integer(0), Object::Integer(-24)],
                ));
            }
            operations.push(Operation::new("Tj", vec![Object::string_literal(line.as_str())]));
        }
        operations.push(Operation::new("ET", vec![]));
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(595),
                Object::Integer(842),
            ]),
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages.len() as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    (doc, page_ids)
}

fn attach_outline(doc: &mut Document, items: &[OutlineSpec]) {
    if items.is_empty() {
        return;
    }
    let outlines_id = doc.new_object_id();
    let (first, last) = add_items(doc, outlines_id, items);
    doc.objects.insert(
        outlines_id,
        Object::Dictionary(dictionary! {
            "Type" => "Outlines",
            "First" => first,
            "Last" => last,
            "Count" => items.len() as i64,
        }),
    );

    let root = match doc.trailer.get(b"Root") {
        Ok(Object::Reference(r)) => *r,
        _ => panic!("fixture has no catalog"),
    };
    doc.get_dictionary_mut(root)
        .unwrap()
        .set("Outlines", outlines_id);
}

fn add_items(doc: &mut Document, parent: ObjectId, items: &[OutlineSpec]) -> (ObjectId, ObjectId) {
    let ids: Vec<ObjectId> = items.iter().map(|_| doc.new_object_id()).collect();

    for (i, item) in items.iter().enumerate() {
        let mut dict = dictionary! {
            "Title" => item.title.clone(),
            "Parent" => parent,
        };
        if let Some(target) = &item.target {
            if item.use_action {
                let action_id = doc.add_object(dictionary! {
                    "S" => "GoTo",
                    "D" => target.clone(),
                });
                dict.set("A", action_id);
            } else {
                dict.set("Dest", target.clone());
            }
        }
        if i > 0 {
            dict.set("Prev", ids[i - 1]);
        }
        if i + 1 < ids.len() {
            dict.set("Next", ids[i + 1]);
        }
        if !item.children.is_empty() {
            let (first, last) = add_items(doc, ids[i], &item.children);
            dict.set("First", first);
            dict.set("Last", last);
            dict.set("Count", item.children.len() as i64);
        }
        doc.objects.insert(ids[i], Object::Dictionary(dict));
    }

    (ids[0], ids[ids.len() - 1])
}

fn save(mut doc: Document, dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    doc.save(&path).unwrap();
    path
}
