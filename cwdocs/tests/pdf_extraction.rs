use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let encoded = content.encode().expect("content should encode");
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("pdf should serialize");
    bytes
}

#[test]
fn pdf_pages_are_joined_in_page_order() {
    let bytes = pdf_with_pages(&["Users can log in", "Passwords expire after 90 days"]);

    let text = cwdocs::extract_text(Some(&bytes)).expect("pdf should extract");

    let first = text.find("Users can log in").expect("first page text");
    let second = text
        .find("Passwords expire after 90 days")
        .expect("second page text");
    assert!(first < second);
    assert!(text[first..second].contains('\n'));
}

#[test]
fn extract_file_reads_pdf_from_disk() {
    let bytes = pdf_with_pages(&["Checkout requires a cart"]);
    let path = std::env::temp_dir().join(format!("cwdocs-{}.pdf", std::process::id()));
    std::fs::write(&path, &bytes).expect("temp pdf should write");

    let text = cwdocs::extract_file(&path);
    let _ = std::fs::remove_file(&path);

    assert!(text.expect("pdf should extract").contains("Checkout requires a cart"));
}

#[test]
fn markdown_documents_pass_through() {
    let path = std::env::temp_dir().join(format!("cwdocs-{}.md", std::process::id()));
    std::fs::write(&path, "# Stories\n- As a shopper I can pay").expect("temp md should write");

    let text = cwdocs::extract_file(&path);
    let _ = std::fs::remove_file(&path);

    assert_eq!(
        text.expect("markdown should extract"),
        "# Stories\n- As a shopper I can pay"
    );
}
