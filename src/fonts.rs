//! Font registry and stylesheet generation.
//!
//! Every font exposes a CSS custom property (`--pretendard`, …). The
//! generated stylesheet defines one class per font that sets its
//! property, so putting the classes on `<body>` makes all families
//! available to the page styles.

use std::fmt::Write;

use crate::ui::class::ClassSet;

/// URL prefix for self-hosted font files.
pub const LOCAL_FONT_PREFIX: &str = "/fonts";

/// One file of a self-hosted font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFontFile {
    pub path: &'static str,
    /// A single weight (`"700"`) or a variable range (`"45 920"`).
    pub weight: &'static str,
    pub style: &'static str,
}

/// Where a font is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    Google { weights: Vec<&'static str> },
    Local { files: Vec<LocalFontFile> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    pub family: &'static str,
    /// CSS custom property name, including the leading `--`.
    pub variable: &'static str,
    pub display: &'static str,
    pub source: FontSource,
}

impl Font {
    /// Class that defines this font's custom property.
    pub fn class_name(&self) -> &'static str {
        self.variable.trim_start_matches("--")
    }

    fn google_import(&self) -> Option<String> {
        let FontSource::Google { weights } = &self.source else {
            return None;
        };
        let family = self.family.replace(' ', "+");
        let axis = if weights.is_empty() {
            String::new()
        } else {
            format!(":wght@{}", weights.join(";"))
        };
        Some(format!(
            "@import url('https://fonts.googleapis.com/css2?family={family}{axis}&display={}');",
            self.display
        ))
    }

    fn font_faces(&self, out: &mut String) {
        let FontSource::Local { files } = &self.source else {
            return;
        };
        for file in files {
            let _ = writeln!(
                out,
                "@font-face {{ font-family: '{}'; src: url('{}/{}') format('woff2'); \
                 font-weight: {}; font-style: {}; font-display: {}; }}",
                self.family, LOCAL_FONT_PREFIX, file.path, file.weight, file.style, self.display
            );
        }
    }
}

fn local(path: &'static str, weight: &'static str) -> LocalFontFile {
    LocalFontFile {
        path,
        weight,
        style: "normal",
    }
}

/// The fonts shipped with the site.
pub fn default_fonts() -> Vec<Font> {
    vec![
        Font {
            family: "Noto Sans KR",
            variable: "--noto-sans-kr",
            display: "swap",
            source: FontSource::Google { weights: vec![] },
        },
        Font {
            family: "Gothic A1",
            variable: "--gothic-a1",
            display: "swap",
            source: FontSource::Google {
                weights: vec!["100", "200", "300", "400", "500", "600", "700", "800", "900"],
            },
        },
        Font {
            family: "Pretendard",
            variable: "--pretendard",
            display: "swap",
            source: FontSource::Local {
                files: vec![local("PretendardVariable.woff2", "45 920")],
            },
        },
        Font {
            family: "Spoqa Han Sans Neo",
            variable: "--spoqa-han-sans-neo",
            display: "swap",
            source: FontSource::Local {
                files: vec![
                    local("SpoqaHanSansNeo-Bold.woff2", "700"),
                    local("SpoqaHanSansNeo-Medium.woff2", "500"),
                    local("SpoqaHanSansNeo-Regular.woff2", "400"),
                    local("SpoqaHanSansNeo-Light.woff2", "300"),
                    local("SpoqaHanSansNeo-Thin.woff2", "100"),
                ],
            },
        },
    ]
}

/// Full stylesheet: imports first (CSS requires it), then faces, then classes.
pub fn stylesheet(fonts: &[Font]) -> String {
    let mut out = String::new();
    for import in fonts.iter().filter_map(Font::google_import) {
        out.push_str(&import);
        out.push('\n');
    }
    for font in fonts {
        font.font_faces(&mut out);
    }
    for font in fonts {
        let _ = writeln!(
            out,
            ".{} {{ {}: '{}', sans-serif; }}",
            font.class_name(),
            font.variable,
            font.family
        );
    }
    out
}

/// Classes to put on `<body>` so every font variable is defined.
pub fn variable_classes(fonts: &[Font]) -> ClassSet {
    fonts.iter().map(Font::class_name).collect()
}
