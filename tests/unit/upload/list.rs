use super::*;

fn pixel() -> UploadedImage {
    UploadedImage::from_rgba8(1, 1, vec![255, 0, 0, 255]).unwrap()
}

#[test]
fn single_image_kinds_replace() {
    for kind in [TemplateKind::Frame, TemplateKind::Mug] {
        let mut list = ImageList::new();
        let mut last = None;
        for _ in 0..5 {
            let img = pixel();
            last = Some(img.id());
            assert_eq!(list.insert(kind, img), 0);
            assert_eq!(list.len(), 1);
        }
        assert_eq!(list.get(0).map(UploadedImage::id), last);
    }
}

#[test]
fn collage_appends_in_order() {
    let mut list = ImageList::new();
    let mut ids = Vec::new();
    for n in 0..7 {
        let img = pixel();
        ids.push(img.id());
        assert_eq!(list.insert(TemplateKind::Collage, img), n);
    }
    assert_eq!(list.len(), 7);
    let got: Vec<_> = list.iter().map(UploadedImage::id).collect();
    assert_eq!(got, ids);
}

#[test]
fn empty_list() {
    let list = ImageList::new();
    assert!(list.is_empty());
    assert!(list.get(0).is_none());
    assert!(list.as_slice().is_empty());
}
