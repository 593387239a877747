use cv_gen::canvas::{CanvasOp, DocumentCanvas, FontStyle, RecordingCanvas};
use cv_gen::pagesize;
use cv_gen::{
    generate_resume_document, generate_resume_document_with, ContactSection, CvError,
    ExperienceJob, Language, LayoutConfig, Mm, ProjectItem, ResumeContent, SkillCategory, Social,
    Stat,
};

const BOTTOM: Mm = Mm(297.0 - 15.0);
const LEFT_X: Mm = Mm(15.0);
const RIGHT_X: Mm = Mm(15.0 + 58.0 + 8.0);

fn job(role: &str, description: &str) -> ExperienceJob {
    ExperienceJob {
        id: role.to_lowercase(),
        role: role.to_string(),
        company: "Acme".to_string(),
        period: "2020 - 2023".to_string(),
        description: description.to_string(),
        tags: vec!["Rust".to_string(), "PDF".to_string()],
    }
}

fn project(title: &str, link: Option<&str>) -> ProjectItem {
    ProjectItem {
        id: title.to_lowercase(),
        title: title.to_string(),
        description: "A small tool".to_string(),
        tags: vec!["CLI".to_string()],
        link: link.map(str::to_string),
    }
}

fn sample() -> ResumeContent {
    let mut content = ResumeContent {
        name: "José Carlos Torres Rivera".to_string(),
        title: "Software Engineer".to_string(),
        subtitle: "Backend".to_string(),
        tagline: "Building reliable systems".to_string(),
        description: "Engineer with a taste for typesetting.".to_string(),
        location: "Lima, Peru".to_string(),
        phone: "+51 999 999 999".to_string(),
        email: "jose@example.com".to_string(),
        whatsapp: Some("+51999999999".to_string()),
        social: Social {
            linkedin: Some("https://www.linkedin.com/in/jose".to_string()),
            github: Some("https://github.com/jose".to_string()),
            portfolio: None,
        },
        stats: vec![Stat {
            id: "years".to_string(),
            value: "8+".to_string(),
            label: "years of experience".to_string(),
        }],
        ..ResumeContent::default()
    };
    content.sections.experience.title = "Experience".to_string();
    content.sections.experience.jobs = vec![
        job("Role A", "Did the first thing."),
        job("Role B", "Did the second thing."),
        job("Role C", "Did the third thing."),
    ];
    content.sections.skills.title = "Skills".to_string();
    content.sections.skills.categories = vec![SkillCategory {
        id: "lang".to_string(),
        icon: Some("code".to_string()),
        title: "Languages".to_string(),
        items: vec!["Rust".to_string(), "TypeScript".to_string()],
    }];
    content.sections.projects.title = "Projects".to_string();
    content.sections.projects.items = vec![
        project("Linked", Some("https://example.com/x")),
        project("Unlinked", None),
    ];
    content.sections.contact = ContactSection {
        title: "Contact".to_string(),
        subtitle: "Let's talk".to_string(),
        closing: "Thanks for reading.".to_string(),
        signature: "José".to_string(),
    };
    content
}

fn render(content: &ResumeContent, language: Language) -> RecordingCanvas {
    let mut canvas = RecordingCanvas::default();
    generate_resume_document(&mut canvas, content, language).unwrap();
    canvas
}

/// (page, x, y, lines, line height) of every text op
fn texts(canvas: &RecordingCanvas) -> Vec<(usize, Mm, Mm, Vec<String>, Mm)> {
    canvas
        .ops()
        .iter()
        .filter_map(|op| match op {
            CanvasOp::Text {
                page,
                lines,
                x,
                y,
                line_height,
                ..
            } => Some((*page, *x, *y, lines.clone(), *line_height)),
            _ => None,
        })
        .collect()
}

fn position_of(lines: &[String], needle: &str) -> usize {
    lines
        .iter()
        .position(|line| line == needle)
        .unwrap_or_else(|| panic!("{needle:?} was never drawn"))
}

#[test]
fn experience_blocks_keep_their_order() {
    let canvas = render(&sample(), Language::TARGET);
    let lines = canvas.text_lines();

    let a = position_of(&lines, "Role A");
    let b = position_of(&lines, "Role B");
    let c = position_of(&lines, "Role C");
    assert!(a < b && b < c);
}

#[test]
fn sections_are_drawn_in_order() {
    let canvas = render(&sample(), Language::TARGET);
    let lines = canvas.text_lines();

    let order = ["Links", "Highlights", "Skills", "Profile", "Experience", "Projects"]
        .map(|title| position_of(&lines, title));
    assert!(order.windows(2).all(|pair| pair[0] < pair[1]), "{order:?}");
}

#[test]
fn empty_sections_are_omitted() {
    let mut content = sample();
    content.stats.clear();
    content.social = Social::default();
    content.sections.projects.items.clear();

    let lines = render(&content, Language::TARGET).text_lines();
    assert!(!lines.iter().any(|line| line == "Highlights"));
    assert!(!lines.iter().any(|line| line == "Links"));
    assert!(!lines.iter().any(|line| line == "Projects"));
    assert!(lines.iter().any(|line| line == "Experience"));
}

#[test]
fn left_column_lines_are_composed_from_the_content() {
    let lines = render(&sample(), Language::TARGET).text_lines();
    for expected in [
        "Lima, Peru",
        "WhatsApp: +51999999999",
        "LinkedIn: www.linkedin.com/in/jose",
        "GitHub: github.com/jose",
        "8+ — years of experience",
        "Languages: Rust • TypeScript",
    ] {
        position_of(&lines, expected);
    }
    assert!(!lines.iter().any(|line| line.starts_with("Portfolio:")));
}

#[test]
fn labels_follow_the_language() {
    let lines = render(&sample(), Language::SOURCE).text_lines();
    position_of(&lines, "Perfil");
    position_of(&lines, "Enlaces");
    position_of(&lines, "Destacados");
}

#[test]
fn filename_is_derived_from_name_and_language() {
    let canvas = render(&sample(), Language::TARGET);
    assert_eq!(
        canvas.saved_filename(),
        Some("CV_jose_carlos_torres_rivera_EN.pdf")
    );
    assert!(matches!(canvas.ops().last(), Some(CanvasOp::Save { .. })));
}

#[test]
fn document_info_names_the_author() {
    let canvas = render(&sample(), Language::TARGET);
    let info = canvas
        .ops()
        .iter()
        .find_map(|op| match op {
            CanvasOp::SetInfo(info) => Some(info.clone()),
            _ => None,
        })
        .expect("no document info");
    assert_eq!(info.author.as_deref(), Some("José Carlos Torres Rivera"));
    assert_eq!(
        info.title.as_deref(),
        Some("José Carlos Torres Rivera — CV")
    );
}

#[test]
fn project_links_are_only_drawn_when_present() {
    let lines = render(&sample(), Language::TARGET).text_lines();
    let links: Vec<&String> = lines.iter().filter(|l| l.starts_with("Link: ")).collect();
    assert_eq!(links, vec!["Link: example.com/x"]);

    let mut content = sample();
    content.sections.projects.items = vec![project("Unlinked", None)];
    let lines = render(&content, Language::TARGET).text_lines();
    assert!(!lines.iter().any(|line| line.starts_with("Link: ")));
}

#[test]
fn hazardous_characters_never_reach_the_canvas() {
    let mut content = sample();
    content.name = "<b>Tom & \"Jerry\"</b>".to_string();
    content.description = "I write <script>alert('x')</script> & more".to_string();
    content.sections.experience.jobs[0].tags = vec!["<C++>".to_string()];

    let canvas = render(&content, Language::TARGET);
    for line in canvas.text_lines() {
        assert!(!line.contains(&['<', '>', '"', '\'', '&'][..]), "{line:?}");
    }
}

#[test]
fn long_experience_breaks_onto_continuation_pages() {
    let mut content = sample();
    content.sections.experience.jobs = (0..40)
        .map(|i| job(&format!("Role {i}"), &lipsum::lipsum(60)))
        .collect();
    let canvas = render(&content, Language::TARGET);
    let ops = canvas.ops();

    let breaks: Vec<usize> = ops
        .iter()
        .enumerate()
        .filter(|(_, op)| **op == CanvasOp::AddPage)
        .map(|(i, _)| i)
        .collect();
    assert!(!breaks.is_empty());
    assert_eq!(canvas.page_count(), breaks.len() + 1);

    for i in breaks {
        // the first thing drawn on the new page is the name, followed by a rule
        let mut drawn = ops[i + 1..].iter().filter(|op| {
            matches!(op, CanvasOp::Text { .. } | CanvasOp::Line { .. })
        });
        match drawn.next() {
            Some(CanvasOp::Text {
                lines,
                style: FontStyle::Bold,
                ..
            }) => assert_eq!(lines, &vec!["José Carlos Torres Rivera".to_string()]),
            other => panic!("expected the continuation name, got {other:?}"),
        }
        assert!(matches!(drawn.next(), Some(CanvasOp::Line { .. })));
    }

    // roles survive the breaks in order
    let lines = canvas.text_lines();
    let positions: Vec<usize> = (0..40)
        .map(|i| position_of(&lines, &format!("Role {i}")))
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn nothing_is_drawn_below_the_bottom_margin() {
    let mut content = sample();
    content.sections.experience.jobs = (0..25)
        .map(|i| job(&format!("Role {i}"), &lipsum::lipsum(90)))
        .collect();
    let canvas = render(&content, Language::TARGET);

    for (page, _, y, lines, line_height) in texts(&canvas) {
        let last_baseline = y + line_height * (lines.len() as f32 - 1.0);
        assert!(
            last_baseline <= BOTTOM,
            "page {page}: {lines:?} ends at {last_baseline}"
        );
    }
}

#[test]
fn continuation_pages_resume_below_the_short_header() {
    let mut content = sample();
    content.sections.experience.jobs = (0..30)
        .map(|i| job(&format!("Role {i}"), &lipsum::lipsum(60)))
        .collect();
    let canvas = render(&content, Language::TARGET);

    let first_right_on_page_2 = texts(&canvas)
        .into_iter()
        .find(|(page, x, ..)| *page == 2 && *x == RIGHT_X)
        .expect("nothing on page 2");
    assert_eq!(first_right_on_page_2.2, Mm(15.0 + 8.0));
}

#[test]
fn paragraphs_taller_than_a_page_are_split() {
    let mut content = sample();
    content.description = lipsum::lipsum(3000);
    let config = LayoutConfig {
        sanitize_limit: usize::MAX,
        ..LayoutConfig::default()
    };
    let mut canvas = RecordingCanvas::default();
    generate_resume_document_with(&mut canvas, &content, Language::TARGET, &config).unwrap();

    assert!(canvas.page_count() >= 3);
    for (_, _, y, lines, line_height) in texts(&canvas) {
        assert!(y + line_height * (lines.len() as f32 - 1.0) <= BOTTOM);
    }
}

#[test]
fn left_column_overflow_is_dropped_not_drawn_past_the_page() {
    let mut content = sample();
    content.sections.skills.categories = (0..80)
        .map(|i| SkillCategory {
            id: i.to_string(),
            icon: None,
            title: format!("Category {i}"),
            items: lipsum::lipsum_words(12)
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        })
        .collect();
    let canvas = render(&content, Language::TARGET);

    // the continuation header shares the left edge
    let name = vec!["José Carlos Torres Rivera".to_string()];
    let left: Vec<_> = texts(&canvas)
        .into_iter()
        .filter(|(_, x, _, lines, _)| *x == LEFT_X && *lines != name)
        .collect();
    assert!(left.iter().all(|(page, ..)| *page == 1));
    for (_, _, y, lines, line_height) in left {
        assert!(y + line_height * (lines.len() as f32 - 1.0) <= BOTTOM);
    }
    assert!(canvas.saved_filename().is_some());
}

#[test]
fn right_column_starts_below_a_taller_left_column() {
    let mut content = sample();
    content.description = "Short.".to_string();
    content.sections.experience.jobs.truncate(1);
    content.sections.projects.items.clear();
    content.sections.skills.categories = (0..12)
        .map(|i| SkillCategory {
            id: i.to_string(),
            icon: None,
            title: format!("Category {i}"),
            items: vec!["one".to_string(), "two".to_string()],
        })
        .collect();
    let canvas = render(&content, Language::TARGET);
    let texts = texts(&canvas);

    let lowest_left = texts
        .iter()
        .filter(|(page, x, ..)| *page == 1 && *x == LEFT_X)
        .map(|(_, _, y, lines, lh)| *y + *lh * (lines.len() as f32 - 1.0))
        .fold(Mm(0.0), Mm::max);
    let profile_title = texts
        .iter()
        .find(|(_, x, _, lines, _)| *x == RIGHT_X && lines == &vec!["Profile".to_string()])
        .expect("profile missing");
    assert_eq!(profile_title.0, 1);
    assert!(
        profile_title.2 > lowest_left,
        "left column ends at {lowest_left}, profile title at {}",
        profile_title.2
    );
}

/// y of the first rule drawn, and the index of its op
fn first_rule(canvas: &RecordingCanvas) -> (usize, Mm) {
    canvas
        .ops()
        .iter()
        .enumerate()
        .find_map(|(i, op)| match op {
            CanvasOp::Line { from, to, .. } => {
                assert_eq!(from.1, to.1, "rules are horizontal");
                Some((i, from.1))
            }
            _ => None,
        })
        .expect("no rule drawn")
}

/// The first text drawn at `x` after op `after`, as (lines, y)
fn first_text_at(canvas: &RecordingCanvas, after: usize, at: Mm) -> (Vec<String>, Mm) {
    canvas.ops()[after + 1..]
        .iter()
        .find_map(|op| match op {
            CanvasOp::Text { lines, x, y, .. } if *x == at => Some((lines.clone(), *y)),
            _ => None,
        })
        .unwrap_or_else(|| panic!("nothing drawn at {at} after op {after}"))
}

#[test]
fn header_is_drawn_in_order_above_its_rule() {
    let canvas = render(&sample(), Language::TARGET);
    let (rule, rule_y) = first_rule(&canvas);

    let header: Vec<(Vec<String>, Mm)> = canvas.ops()[..rule]
        .iter()
        .filter_map(|op| match op {
            CanvasOp::Text { lines, y, .. } => Some((lines.clone(), *y)),
            _ => None,
        })
        .collect();
    let lines: Vec<String> = header.iter().flat_map(|(lines, _)| lines.clone()).collect();
    assert_eq!(
        lines,
        [
            "José Carlos Torres Rivera",
            "Software Engineer — Backend",
            "Building reliable systems"
        ]
    );
    assert!(header.windows(2).all(|pair| pair[0].1 < pair[1].1));
    let tagline_y = header.last().map(|(_, y)| *y).unwrap();
    assert!(tagline_y < rule_y);

    // the left column starts right below the header
    let (title, y) = first_text_at(&canvas, rule, LEFT_X);
    assert_eq!(title, vec!["Contact".to_string()]);
    assert_eq!(y, rule_y + Mm(6.0));

    // the right column only ever starts lower, below the left column
    let (title, y) = first_text_at(&canvas, rule, RIGHT_X);
    assert_eq!(title, vec!["Profile".to_string()]);
    assert!(y >= rule_y + Mm(6.0));
}

#[test]
fn right_column_starts_below_the_header_when_the_left_is_empty() {
    let mut content = sample();
    content.location.clear();
    content.phone.clear();
    content.email.clear();
    content.whatsapp = None;
    content.social = Social::default();
    content.stats.clear();
    content.sections.skills.categories.clear();
    let canvas = render(&content, Language::TARGET);
    let (rule, rule_y) = first_rule(&canvas);

    let (title, y) = first_text_at(&canvas, rule, RIGHT_X);
    assert_eq!(title, vec!["Profile".to_string()]);
    assert_eq!(y, rule_y + Mm(6.0));
    assert!(canvas.ops()[rule + 1..]
        .iter()
        .all(|op| !matches!(op, CanvasOp::Text { x, .. } if *x == LEFT_X)));
}

#[test]
fn job_descriptions_are_followed_by_a_paragraph_gap() {
    let canvas = render(&sample(), Language::TARGET);
    let texts = texts(&canvas);

    let description = texts
        .iter()
        .position(|(_, _, _, lines, _)| lines == &vec!["Did the first thing.".to_string()])
        .expect("description missing");
    let (_, _, y, lines, line_height) = &texts[description];
    let (_, _, tags_y, tags, _) = &texts[description + 1];
    assert_eq!(tags, &vec!["Skills: Rust, PDF".to_string()]);
    assert_eq!(*tags_y, *y + *line_height * lines.len() as f32 + Mm(2.0));
}

#[test]
fn canvas_failures_abort_the_generation() {
    for calls in [0, 1, 3, 10, 25] {
        let mut canvas = RecordingCanvas::default().failing_after(calls);
        let result = generate_resume_document(&mut canvas, &sample(), Language::TARGET);
        assert!(matches!(result, Err(CvError::Io(_))), "after {calls} calls");
        assert_eq!(canvas.saved_filename(), None);
    }
}

#[test]
fn empty_content_still_saves() {
    let canvas = render(&ResumeContent::default(), Language::SOURCE);
    assert_eq!(canvas.saved_filename(), Some("CV_resume_ES.pdf"));
    assert_eq!(canvas.page_count(), 1);
}

#[test]
fn letter_pages_use_their_own_bottom_margin() {
    let mut content = sample();
    content.sections.experience.jobs = (0..30)
        .map(|i| job(&format!("Role {i}"), &lipsum::lipsum(60)))
        .collect();
    let mut canvas = RecordingCanvas::new(pagesize::LETTER);
    generate_resume_document(&mut canvas, &content, Language::TARGET).unwrap();

    let bottom = canvas.page_size().1 - Mm(15.0);
    assert!(canvas.page_count() > 1);
    for (_, _, y, lines, line_height) in texts(&canvas) {
        assert!(y + line_height * (lines.len() as f32 - 1.0) <= bottom);
    }
}
