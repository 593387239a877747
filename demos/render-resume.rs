use cv_gen::canvas::{CanvasConfig, DirectorySink, FontPaths};
use cv_gen::{render_resume_pdf, Language, LayoutConfig, ResumeContent};
use std::path::PathBuf;

// cargo run --example render-resume -- [content.json] [font dir] [out dir] [es|en]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let content = args
        .next()
        .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/demos/resume.json").into());
    let font_dir = PathBuf::from(
        args.next()
            .unwrap_or_else(|| "/usr/share/fonts/truetype/dejavu".into()),
    );
    let out_dir = args.next().unwrap_or_else(|| "out".into());
    let language = match args.next().as_deref() {
        Some("en") => Language::TARGET,
        _ => Language::SOURCE,
    };

    let content = ResumeContent::from_path(&content).expect("can load resume content");
    let config = CanvasConfig::new(FontPaths {
        regular: font_dir.join("DejaVuSans.ttf"),
        bold: font_dir.join("DejaVuSans-Bold.ttf"),
        italic: font_dir.join("DejaVuSans-Oblique.ttf"),
    });
    log::info!("layout: {:?}", LayoutConfig::default());

    let filename = render_resume_pdf(&config, DirectorySink::new(&out_dir), &content, language)
        .expect("can render resume");
    println!("wrote {out_dir}/{filename}");
}
