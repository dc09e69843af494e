use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use usvg::fontdb;

use crate::draw::surface::{FontWeight, TextStyle};
use crate::foundation::core::Rgba8;
use crate::foundation::error::{LifegridError, LifegridResult};

/// Bundled DejaVu Sans, used when neither a configured path nor a system face is usable.
const BUNDLED_REGULAR: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
const BUNDLED_BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

/// Families preferred when querying the system database, ahead of the generic sans-serif.
const PREFERRED_FAMILIES: &[&str] = &[
    "Inter",
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Arial",
    "Helvetica",
];

/// Where the process should look for its text faces.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontSources {
    /// Regular face; the system database is queried when absent or unreadable.
    pub regular: Option<PathBuf>,
    /// Bold face; looked up in the regular face's family when absent.
    pub bold: Option<PathBuf>,
}

/// One registered face: the raw blob for Parley and where it came from.
#[derive(Clone)]
pub(crate) struct FontFace {
    pub(crate) family: String,
    pub(crate) origin: String,
    blob: parley::fontique::Blob<u8>,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family", &self.family)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

impl FontFace {
    /// Read and register a face; fails when the bytes do not yield a named family.
    pub(crate) fn load(path: &Path) -> LifegridResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            LifegridError::font(format!("failed to read font '{}': {e}", path.display()))
        })?;
        Self::from_bytes(bytes, 0, path.display().to_string())
    }

    /// Register face `index` of a font file or collection held in `bytes`.
    pub(crate) fn from_bytes(
        bytes: Vec<u8>,
        index: u32,
        origin: impl Into<String>,
    ) -> LifegridResult<Self> {
        let origin = origin.into();
        let blob = parley::fontique::Blob::from(bytes);
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx.collection.register_fonts(blob.clone(), None);
        let family_id = families
            .iter()
            .find(|(_, fonts)| fonts.iter().any(|f| f.index() == index))
            .or(families.first())
            .map(|(id, _)| *id)
            .ok_or_else(|| LifegridError::font(format!("no font families in '{origin}'")))?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| LifegridError::font("registered font family has no name"))?
            .to_string();

        Ok(Self {
            family,
            origin,
            blob,
        })
    }
}

/// The process-wide set of text faces.
///
/// [`FontLibrary::discover`] always yields at least the bundled face. [`FontLibrary::empty`]
/// exists for measurement-only rendering: raster text is skipped and widths are approximated.
#[derive(Clone, Debug, Default)]
pub struct FontLibrary {
    regular: Option<FontFace>,
    bold: Option<FontFace>,
}

impl FontLibrary {
    /// Resolve faces from `sources`, then the system font database, then the bundled face.
    pub fn discover(sources: &FontSources) -> Self {
        let configured = sources.regular.as_deref().and_then(|p| match FontFace::load(p) {
            Ok(face) => Some(face),
            Err(e) => {
                tracing::warn!(error = %e, "configured font unusable; querying system fonts");
                None
            }
        });

        let mut db = fontdb::Database::new();
        db.load_system_fonts();

        let Some(regular) = configured.or_else(|| system_face(&db, None, fontdb::Weight::NORMAL))
        else {
            tracing::warn!("no usable system font; using the bundled face");
            return Self::bundled();
        };

        // Parley picks faces inside the regular family, so a bold face from another family
        // would never be selected.
        let bold = sources
            .bold
            .as_deref()
            .and_then(|p| FontFace::load(p).ok())
            .or_else(|| system_face(&db, Some(&regular.family), fontdb::Weight::BOLD))
            .filter(|b| b.family == regular.family);

        tracing::info!(
            family = %regular.family,
            origin = %regular.origin,
            bold = bold.is_some(),
            "fonts loaded"
        );
        Self {
            regular: Some(regular),
            bold,
        }
    }

    /// The bundled DejaVu Sans regular and bold faces.
    pub fn bundled() -> Self {
        let load = |bytes: &[u8], name: &str| {
            FontFace::from_bytes(bytes.to_vec(), 0, name)
                .map_err(|e| tracing::error!(error = %e, "bundled font unusable"))
                .ok()
        };
        Self {
            regular: load(BUNDLED_REGULAR, "bundled:DejaVuSans.ttf"),
            bold: load(BUNDLED_BOLD, "bundled:DejaVuSans-Bold.ttf"),
        }
    }

    /// A library with no faces at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.regular.is_none()
    }

    /// Family name of the regular face, if any.
    pub fn family(&self) -> Option<&str> {
        self.regular.as_ref().map(|f| f.family.as_str())
    }

    pub fn has_bold(&self) -> bool {
        self.bold.is_some()
    }

    fn faces(&self) -> impl Iterator<Item = &FontFace> {
        self.regular.iter().chain(self.bold.iter())
    }
}

/// Best system face at `weight`, restricted to `family` when given.
///
/// Returns `None` when the match is not actually of the requested weight class, so a bold
/// lookup never hands back the regular face again.
fn system_face(
    db: &fontdb::Database,
    family: Option<&str>,
    weight: fontdb::Weight,
) -> Option<FontFace> {
    let mut families: Vec<fontdb::Family<'_>> = match family {
        Some(name) => vec![fontdb::Family::Name(name)],
        None => PREFERRED_FAMILIES
            .iter()
            .map(|name| fontdb::Family::Name(*name))
            .collect(),
    };
    if family.is_none() {
        families.push(fontdb::Family::SansSerif);
    }
    let query = fontdb::Query {
        families: &families,
        weight,
        ..fontdb::Query::default()
    };
    let id = db.query(&query)?;
    let info = db.face(id)?;
    if (info.weight.0 >= 600) != (weight.0 >= 600) {
        return None;
    }
    let origin = match &info.source {
        fontdb::Source::File(path) | fontdb::Source::SharedFile(path, _) => {
            path.display().to_string()
        }
        fontdb::Source::Binary(_) => info.post_script_name.clone(),
    };
    let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;
    match FontFace::from_bytes(bytes, index, origin) {
        Ok(face) => Some(face),
        Err(e) => {
            tracing::debug!(error = %e, "skipping system font");
            None
        }
    }
}

static FONTS: OnceLock<FontLibrary> = OnceLock::new();

/// Load the process font library once. Later calls return the first result and ignore `sources`.
pub fn ensure_fonts_loaded(sources: &FontSources) -> &'static FontLibrary {
    FONTS.get_or_init(|| FontLibrary::discover(sources))
}

/// Stateful helper for shaping single-line text with Parley against a [`FontLibrary`].
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    family: Option<String>,
}

impl TextLayoutEngine {
    /// Construct fresh Parley contexts with every face in `fonts` registered.
    pub(crate) fn new(fonts: &FontLibrary) -> Self {
        let mut font_ctx = parley::FontContext::default();
        for face in fonts.faces() {
            font_ctx.collection.register_fonts(face.blob.clone(), None);
        }
        Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family: fonts.family().map(str::to_owned),
        }
    }

    /// Shape `text` on one line. `None` when no face is registered or the size is unusable.
    pub(crate) fn layout(
        &mut self,
        text: &str,
        style: &TextStyle,
    ) -> Option<parley::Layout<Rgba8>> {
        let family = self.family.clone()?;
        if !style.size.is_finite() || style.size <= 0.0 || text.is_empty() {
            return None;
        }

        let weight = match style.weight {
            FontWeight::Bold => parley::style::FontWeight::BOLD,
            FontWeight::Regular => parley::style::FontWeight::NORMAL,
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(style.size as f32));
        builder.push_default(parley::style::StyleProperty::FontWeight(weight));
        builder.push_default(parley::style::StyleProperty::Brush(style.color));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        Some(layout)
    }
}

/// Width estimate used when no face is available (and by the recording backend).
pub fn approximate_width(text: &str, style: &TextStyle) -> f64 {
    let per_char = match style.weight {
        FontWeight::Bold => 0.6,
        FontWeight::Regular => 0.55,
    };
    text.chars().count() as f64 * style.size * per_char
}

#[cfg(test)]
#[path = "../../tests/unit/draw/text.rs"]
mod tests;
