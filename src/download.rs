//! The "download my résumé" action: one generation at a time, with user feedback.

use crate::canvas::DocumentCanvas;
use crate::content_model::{Language, ResumeContent};
use crate::resume::{generate_resume_document_with, LayoutConfig};
use crate::{CvError, Result};
use std::sync::atomic::{AtomicBool, Ordering};

/// User-facing feedback about a download, already localized
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Info(String),
    Success(String),
    Error(String),
}

/// Receives download feedback, e.g. to show it as a toast
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

impl<F> Notifier for F
where
    F: Fn(Notification),
{
    fn notify(&self, notification: Notification) {
        self(notification)
    }
}

/// A [Notifier] that only writes to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification {
            Notification::Info(message) | Notification::Success(message) => {
                log::info!("{message}")
            }
            Notification::Error(message) => log::warn!("{message}"),
        }
    }
}

struct Messages {
    generating: &'static str,
    ready: &'static str,
    failed: &'static str,
}

fn messages(language: Language) -> Messages {
    match language {
        Language::Es => Messages {
            generating: "Generando CV...",
            ready: "CV listo para descargar",
            failed: "No se pudo generar el CV. Inténtalo de nuevo.",
        },
        Language::En => Messages {
            generating: "Generating CV...",
            ready: "CV ready to download",
            failed: "The CV could not be generated. Please try again.",
        },
    }
}

/// Clears the in-flight flag however the generation ends
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<InFlight<'a>> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs résumé generations on behalf of a user action, refusing to start a second
/// one while the first is still running and reporting the outcome to a [Notifier].
pub struct CvDownloader<N: Notifier> {
    notifier: N,
    config: LayoutConfig,
    in_flight: AtomicBool,
}

impl<N: Notifier> CvDownloader<N> {
    pub fn new(notifier: N) -> CvDownloader<N> {
        CvDownloader::with_config(notifier, LayoutConfig::default())
    }

    pub fn with_config(notifier: N, config: LayoutConfig) -> CvDownloader<N> {
        CvDownloader {
            notifier,
            config,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a generation is running right now
    pub fn is_generating(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Generate `content` onto `canvas` and save it.
    ///
    /// The language is `language` if given, otherwise the one the content is tagged
    /// with, otherwise the source language. Fails with
    /// [CvError::GenerationInFlight] without notifying anyone if another generation
    /// is still running; any generation error is logged, reported to the notifier
    /// and returned.
    pub fn download<C: DocumentCanvas + ?Sized>(
        &self,
        canvas: &mut C,
        content: &ResumeContent,
        language: Option<Language>,
    ) -> Result<()> {
        let _guard = InFlight::acquire(&self.in_flight).ok_or(CvError::GenerationInFlight)?;

        let language = language.or(content.lang).unwrap_or_default();
        let messages = messages(language);
        self.notifier
            .notify(Notification::Info(messages.generating.to_string()));

        match generate_resume_document_with(canvas, content, language, &self.config) {
            Ok(()) => {
                self.notifier
                    .notify(Notification::Success(messages.ready.to_string()));
                Ok(())
            }
            Err(e) => {
                log::error!("CV generation failed: {e}");
                self.notifier
                    .notify(Notification::Error(messages.failed.to_string()));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;
    use std::sync::Mutex;

    fn content() -> ResumeContent {
        ResumeContent {
            name: "Ada Lovelace".into(),
            description: "Analyst".into(),
            ..ResumeContent::default()
        }
    }

    #[test]
    fn reports_success_in_the_content_language() {
        let seen = Mutex::new(Vec::new());
        let downloader = CvDownloader::new(|n: Notification| seen.lock().unwrap().push(n));
        let mut canvas = RecordingCanvas::default();
        let mut content = content();
        content.lang = Some(Language::En);

        downloader.download(&mut canvas, &content, None).unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                Notification::Info("Generating CV...".into()),
                Notification::Success("CV ready to download".into()),
            ]
        );
        assert_eq!(canvas.saved_filename(), Some("CV_ada_lovelace_EN.pdf"));
        assert!(!downloader.is_generating());
    }

    #[test]
    fn reports_and_returns_failures() {
        let seen = Mutex::new(Vec::new());
        let downloader = CvDownloader::new(|n: Notification| seen.lock().unwrap().push(n));
        let mut canvas = RecordingCanvas::default().failing_after(2);

        let result = downloader.download(&mut canvas, &content(), Some(Language::Es));

        assert!(matches!(result, Err(CvError::Io(_))));
        assert_eq!(
            seen.lock().unwrap().last(),
            Some(&Notification::Error(
                "No se pudo generar el CV. Inténtalo de nuevo.".into()
            ))
        );
        assert!(!downloader.is_generating());
    }

    #[test]
    fn refuses_overlapping_generations() {
        let downloader = CvDownloader::new(LogNotifier);
        let _running = InFlight::acquire(&downloader.in_flight).unwrap();

        let mut canvas = RecordingCanvas::default();
        let result = downloader.download(&mut canvas, &content(), None);

        assert!(matches!(result, Err(CvError::GenerationInFlight)));
        assert!(canvas.ops().is_empty());
        assert!(downloader.is_generating());
    }
}
