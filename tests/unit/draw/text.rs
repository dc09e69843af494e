use super::*;

fn style(size: f64) -> TextStyle {
    TextStyle::new(size, Rgba8::WHITE)
}

#[test]
fn garbage_bytes_are_a_font_error() {
    let err = FontFace::from_bytes(vec![0, 1, 2, 3], 0, "junk.ttf").unwrap_err();
    assert!(matches!(err, LifegridError::Font(_)), "{err}");
}

#[test]
fn unreadable_path_is_a_font_error() {
    let err = FontFace::load(Path::new("/definitely/not/here.ttf")).unwrap_err();
    assert!(err.to_string().starts_with("font error:"));
}

#[test]
fn empty_library_shapes_nothing() {
    let lib = FontLibrary::empty();
    assert!(lib.is_empty());
    assert!(!lib.has_bold());
    let mut engine = TextLayoutEngine::new(&lib);
    assert!(engine.layout("hello", &style(20.0)).is_none());
}

#[test]
fn bundled_faces_share_one_family() {
    let lib = FontLibrary::bundled();
    assert_eq!(lib.family(), Some("DejaVu Sans"));
    assert!(lib.has_bold());
}

#[test]
fn discovery_never_comes_back_empty() {
    let lib = FontLibrary::discover(&FontSources {
        regular: Some(PathBuf::from("/nope/regular.ttf")),
        bold: Some(PathBuf::from("/nope/bold.ttf")),
    });
    assert!(!lib.is_empty());
    if let Some(bold) = lib.bold.as_ref() {
        assert_eq!(Some(bold.family.as_str()), lib.family());
    }
}

#[test]
fn configured_path_wins_over_system_fonts() {
    let dir = PathBuf::from("target").join("font_config");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("Configured.ttf");
    std::fs::write(&path, BUNDLED_REGULAR).unwrap();

    let lib = FontLibrary::discover(&FontSources {
        regular: Some(path.clone()),
        bold: None,
    });
    assert_eq!(lib.family(), Some("DejaVu Sans"));
    assert_eq!(
        lib.regular.as_ref().map(|f| f.origin.as_str()),
        Some(path.display().to_string().as_str())
    );
}

#[test]
fn bold_lookup_rejects_regular_weight_matches() {
    let mut db = fontdb::Database::new();
    db.load_font_data(BUNDLED_REGULAR.to_vec());
    assert!(system_face(&db, Some("DejaVu Sans"), fontdb::Weight::BOLD).is_none());
    let regular = system_face(&db, None, fontdb::Weight::NORMAL).expect("regular face");
    assert_eq!(regular.family, "DejaVu Sans");
}

#[test]
fn bundled_face_shapes_wider_text_wider() {
    let lib = FontLibrary::bundled();
    let mut engine = TextLayoutEngine::new(&lib);
    let short = engine.layout("ab", &style(24.0)).unwrap();
    let long = engine.layout("abcdefgh", &style(24.0)).unwrap();
    assert!(short.width() > 0.0);
    assert!(long.width() > short.width());
    assert!(engine.layout("", &style(24.0)).is_none());
    assert!(engine.layout("x", &style(0.0)).is_none());
}

#[test]
fn approximate_width_scales_with_size_and_weight() {
    let regular = approximate_width("abcd", &style(10.0));
    assert!((regular - 22.0).abs() < 1e-9);
    assert!(approximate_width("abcd", &style(10.0).bold()) > regular);
    assert_eq!(approximate_width("", &style(10.0)), 0.0);
}
