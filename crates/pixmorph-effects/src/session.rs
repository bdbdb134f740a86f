//! Client session state: the selected file, its preview, the single
//! result slot, and the per-trigger request state machine.
//!
//! The session is generic over the handle type `H` used for previews
//! and results. In the browser `H` is an object URL that revokes itself
//! on drop, so every place the session drops a handle is the moment the
//! underlying resource is released:
//!
//! - the previous preview and result when a new file is selected,
//! - the previous result when a newer one commits,
//! - a successful but stale result, immediately on completion,
//! - everything when the session itself is dropped.
//!
//! # Ordering
//!
//! Each call to [`Session::begin`] issues a [`Ticket`] carrying a
//! monotonically increasing sequence number and the current selection
//! generation. A successful completion commits only if its ticket holds
//! the highest sequence number issued so far *and* the file has not been
//! replaced since. Anything else is discarded, so racing triggers resolve
//! deterministically to the most recently started request.

use std::collections::HashMap;

use crate::effect::EffectRequest;
use crate::error::EffectError;
use crate::file::SelectedFile;

/// Where a single trigger is in its request lifecycle.
///
/// `Requesting` is the only non-idle phase; `Succeeded` and `Failed`
/// are idle phases that remember how the last request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerPhase {
    /// Never invoked for the current file (or its last result was superseded).
    #[default]
    Idle,
    /// A request is in flight; the trigger is disabled.
    Requesting,
    /// The last request committed the current result.
    Succeeded,
    /// The last request failed.
    Failed,
}

impl TriggerPhase {
    #[must_use]
    pub const fn is_requesting(self) -> bool {
        matches!(self, Self::Requesting)
    }
}

/// Proof that a request was started, handed back on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    sequence: u64,
    generation: u64,
    request: EffectRequest,
}

impl Ticket {
    #[must_use]
    pub const fn request(&self) -> EffectRequest {
        self.request
    }

    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Why a completion was not committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    /// A later request was started before this one finished.
    Superseded,
    /// A new file was selected after this request started.
    SelectionChanged,
}

/// What [`Session::complete`] did with an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The handle is now the session's result; any previous one was released.
    Committed,
    /// The request failed; the result is unchanged and the error is the
    /// session's current notice.
    Failed(EffectError),
    /// The outcome was dropped without touching the result or notice.
    Discarded(Staleness),
}

/// State owned by the container: one file, one preview, one result.
#[derive(Debug)]
pub struct Session<H> {
    file: Option<SelectedFile>,
    preview: Option<H>,
    result: Option<H>,
    phases: HashMap<EffectRequest, TriggerPhase>,
    in_flight: HashMap<EffectRequest, u64>,
    notice: Option<EffectError>,
    last_issued: u64,
    generation: u64,
}

impl<H> Default for Session<H> {
    fn default() -> Self {
        Self {
            file: None,
            preview: None,
            result: None,
            phases: HashMap::new(),
            in_flight: HashMap::new(),
            notice: None,
            last_issued: 0,
            generation: 0,
        }
    }
}

impl<H> Session<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    #[must_use]
    pub const fn preview(&self) -> Option<&H> {
        self.preview.as_ref()
    }

    #[must_use]
    pub const fn result(&self) -> Option<&H> {
        self.result.as_ref()
    }

    /// The most recent failure, cleared when the failed trigger is
    /// invoked again or a new file is selected.
    #[must_use]
    pub const fn notice(&self) -> Option<&EffectError> {
        self.notice.as_ref()
    }

    /// Number of file selections made so far.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn phase(&self, request: EffectRequest) -> TriggerPhase {
        self.phases.get(&request).copied().unwrap_or_default()
    }

    /// Number of requests started for the current file that have not
    /// completed yet.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Replace the selected file and its preview.
    ///
    /// Clears the result and the notice, resets every trigger to idle,
    /// and starts a new generation: requests started for the previous
    /// file can no longer commit. The previous preview and result
    /// handles are dropped here.
    pub fn select_file(&mut self, file: SelectedFile, preview: H) {
        self.file = Some(file);
        self.preview = Some(preview);
        self.result = None;
        self.notice = None;
        self.phases.clear();
        self.in_flight.clear();
        self.generation += 1;
    }

    /// Start a request for `request` against the current file.
    ///
    /// Returns `None` without changing anything when no file is
    /// selected or the same trigger already has a request in flight.
    pub fn begin(&mut self, request: EffectRequest) -> Option<Ticket> {
        if self.file.is_none() || self.in_flight.contains_key(&request) {
            return None;
        }
        self.last_issued += 1;
        let ticket = Ticket {
            sequence: self.last_issued,
            generation: self.generation,
            request,
        };
        self.in_flight.insert(request, ticket.sequence);
        self.phases.insert(request, TriggerPhase::Requesting);
        if self.notice.as_ref().and_then(EffectError::request) == Some(request) {
            self.notice = None;
        }
        Some(ticket)
    }

    /// Finish the request identified by `ticket`.
    ///
    /// - From an earlier file selection: discarded, nothing changes.
    /// - Success with the newest ticket: the handle replaces the result.
    /// - Success with an older ticket: discarded, the handle is dropped.
    /// - Failure: the result is kept and the error becomes the notice.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<H, EffectError>) -> Completion {
        if ticket.generation != self.generation {
            return Completion::Discarded(Staleness::SelectionChanged);
        }

        let request = ticket.request;
        if self.in_flight.get(&request) == Some(&ticket.sequence) {
            self.in_flight.remove(&request);
        }

        match outcome {
            Ok(handle) if ticket.sequence == self.last_issued => {
                self.result = Some(handle);
                for phase in self.phases.values_mut() {
                    if *phase == TriggerPhase::Succeeded {
                        *phase = TriggerPhase::Idle;
                    }
                }
                self.phases.insert(request, TriggerPhase::Succeeded);
                Completion::Committed
            }
            Ok(_stale) => {
                self.phases.insert(request, TriggerPhase::Idle);
                Completion::Discarded(Staleness::Superseded)
            }
            Err(err) => {
                self.phases.insert(request, TriggerPhase::Failed);
                self.notice = Some(err.clone());
                Completion::Failed(err)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::effect::{Effect, Style};

    /// Handle that counts how many instances have been released.
    #[derive(Debug)]
    struct Tracked {
        id: &'static str,
        released: Rc<Cell<usize>>,
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.released.set(self.released.get() + 1);
        }
    }

    struct Harness {
        released: Rc<Cell<usize>>,
        session: Session<Tracked>,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                released: Rc::new(Cell::new(0)),
                session: Session::new(),
            }
        }

        fn handle(&self, id: &'static str) -> Tracked {
            Tracked {
                id,
                released: Rc::clone(&self.released),
            }
        }

        fn select(&mut self, name: &str) {
            let file = SelectedFile::new(name, "image/png", vec![1u8, 2, 3]).unwrap();
            let preview = self.handle("preview");
            self.session.select_file(file, preview);
        }

        fn released(&self) -> usize {
            self.released.get()
        }

        fn result_id(&self) -> Option<&'static str> {
            self.session.result().map(|h| h.id)
        }
    }

    fn plain(effect: Effect) -> EffectRequest {
        EffectRequest::new(effect, None).unwrap()
    }

    fn styled(effect: Effect, style: &str) -> EffectRequest {
        EffectRequest::new(effect, Some(Style::parse_for(effect, style).unwrap())).unwrap()
    }

    #[test]
    fn begin_without_file_is_a_no_op() {
        let mut h = Harness::new();
        assert!(h.session.begin(plain(Effect::Cartoon)).is_none());
        assert_eq!(h.session.phase(plain(Effect::Cartoon)), TriggerPhase::Idle);
        assert_eq!(h.session.in_flight(), 0);
    }

    #[test]
    fn selecting_a_file_sets_preview_and_clears_result() {
        let mut h = Harness::new();
        h.select("a.png");
        let ticket = h.session.begin(plain(Effect::GraySketch)).unwrap();
        let handle = h.handle("gray");
        h.session.complete(ticket, Ok(handle));
        assert_eq!(h.result_id(), Some("gray"));

        h.select("b.png");
        assert!(h.session.preview().is_some());
        assert!(h.session.result().is_none());
        assert_eq!(h.session.file().unwrap().name(), "b.png");
        // Old preview and old result were both released.
        assert_eq!(h.released(), 2);
    }

    #[test]
    fn gray_sketch_success_commits_result() {
        let mut h = Harness::new();
        h.select("photo.png");
        let request = plain(Effect::GraySketch);
        let ticket = h.session.begin(request).unwrap();
        assert_eq!(h.session.phase(request), TriggerPhase::Requesting);

        let handle = h.handle("gray");
        assert_eq!(h.session.complete(ticket, Ok(handle)), Completion::Committed);
        assert_eq!(h.result_id(), Some("gray"));
        assert_eq!(h.session.phase(request), TriggerPhase::Succeeded);
        assert!(h.session.notice().is_none());
    }

    #[test]
    fn trigger_is_guarded_while_requesting() {
        let mut h = Harness::new();
        h.select("photo.png");
        let request = plain(Effect::Sticker);
        let first = h.session.begin(request).unwrap();
        assert!(h.session.begin(request).is_none());
        assert_eq!(h.session.in_flight(), 1);

        let handle = h.handle("sticker");
        h.session.complete(first, Ok(handle));
        assert!(h.session.begin(request).is_some());
    }

    #[test]
    fn styles_of_one_effect_are_independent_triggers() {
        let mut h = Harness::new();
        h.select("photo.png");
        assert!(h.session.begin(styled(Effect::PixelArt, "8bit")).is_some());
        assert!(h.session.begin(styled(Effect::PixelArt, "16bit")).is_some());
        assert_eq!(h.session.in_flight(), 2);
    }

    #[test]
    fn new_result_replaces_and_releases_previous() {
        let mut h = Harness::new();
        h.select("photo.png");

        let ticket = h.session.begin(styled(Effect::PixelArt, "8bit")).unwrap();
        let handle = h.handle("8bit");
        h.session.complete(ticket, Ok(handle));
        let before = h.released();

        let ticket = h.session.begin(styled(Effect::PixelArt, "mosaic")).unwrap();
        let handle = h.handle("mosaic");
        h.session.complete(ticket, Ok(handle));

        assert_eq!(h.result_id(), Some("mosaic"));
        assert_eq!(h.released(), before + 1);
        assert_eq!(
            h.session.phase(styled(Effect::PixelArt, "8bit")),
            TriggerPhase::Idle
        );
    }

    #[test]
    fn failure_keeps_result_and_names_style() {
        let mut h = Harness::new();
        h.select("photo.png");
        let ticket = h.session.begin(plain(Effect::Cartoon)).unwrap();
        let handle = h.handle("cartoon");
        h.session.complete(ticket, Ok(handle));

        let candy = styled(Effect::StyleTransfer, "candy");
        let ticket = h.session.begin(candy).unwrap();
        let err = candy.check_status(500).unwrap_err();
        let completion = h.session.complete(ticket, Err(err.clone()));

        assert_eq!(completion, Completion::Failed(err));
        assert_eq!(h.result_id(), Some("cartoon"));
        assert_eq!(h.session.phase(candy), TriggerPhase::Failed);
        assert!(h.session.notice().unwrap().to_string().contains("candy"));
    }

    #[test]
    fn network_failure_leaves_empty_result_empty() {
        let mut h = Harness::new();
        h.select("photo.png");
        let request = plain(Effect::NeonGlow);
        let ticket = h.session.begin(request).unwrap();
        let err = request.transport_error("connection refused");
        h.session.complete(ticket, Err(err));
        assert!(h.session.result().is_none());
        assert!(h.session.notice().unwrap().to_string().contains("Neon Glow"));
        // The trigger is usable again.
        assert!(h.session.begin(request).is_some());
    }

    #[test]
    fn stale_success_is_discarded_and_released() {
        let mut h = Harness::new();
        h.select("photo.png");
        let slow = h.session.begin(plain(Effect::Manga)).unwrap();
        let fast = h.session.begin(plain(Effect::PopArt)).unwrap();

        let handle = h.handle("pop");
        assert_eq!(h.session.complete(fast, Ok(handle)), Completion::Committed);
        let before = h.released();
        let handle = h.handle("manga");
        assert_eq!(
            h.session.complete(slow, Ok(handle)),
            Completion::Discarded(Staleness::Superseded)
        );

        assert_eq!(h.result_id(), Some("pop"));
        assert_eq!(h.released(), before + 1);
        assert_eq!(h.session.phase(plain(Effect::Manga)), TriggerPhase::Idle);
        assert_eq!(h.session.in_flight(), 0);
    }

    #[test]
    fn latest_request_wins_regardless_of_arrival_order() {
        let mut h = Harness::new();
        h.select("photo.png");
        let first = h.session.begin(plain(Effect::Manga)).unwrap();
        let second = h.session.begin(plain(Effect::PopArt)).unwrap();

        let handle = h.handle("pop");
        h.session.complete(second, Ok(handle));
        let handle = h.handle("manga");
        h.session.complete(first, Ok(handle));
        assert_eq!(h.result_id(), Some("pop"));
    }

    #[test]
    fn completion_after_new_selection_is_discarded() {
        let mut h = Harness::new();
        h.select("a.png");
        let ticket = h.session.begin(plain(Effect::ComicArt)).unwrap();
        h.select("b.png");

        let handle = h.handle("comic");
        assert_eq!(
            h.session.complete(ticket, Ok(handle)),
            Completion::Discarded(Staleness::SelectionChanged)
        );
        assert!(h.session.result().is_none());

        let err = plain(Effect::ComicArt).transport_error("aborted");
        assert_eq!(
            h.session.complete(ticket, Err(err)),
            Completion::Discarded(Staleness::SelectionChanged)
        );
        assert!(h.session.notice().is_none());
    }

    #[test]
    fn new_selection_resets_trigger_phases() {
        let mut h = Harness::new();
        h.select("a.png");
        let request = plain(Effect::ColorSketch);
        h.session.begin(request).unwrap();
        h.select("b.png");
        assert_eq!(h.session.phase(request), TriggerPhase::Idle);
        // The old in-flight request no longer blocks the trigger.
        assert!(h.session.begin(request).is_some());
    }

    #[test]
    fn old_ticket_does_not_clear_newer_in_flight_entry() {
        let mut h = Harness::new();
        h.select("a.png");
        let request = plain(Effect::Cartoon);
        let old = h.session.begin(request).unwrap();
        h.select("b.png");
        let _new = h.session.begin(request).unwrap();

        let handle = h.handle("old");
        h.session.complete(old, Ok(handle));
        assert_eq!(h.session.phase(request), TriggerPhase::Requesting);
        assert!(h.session.begin(request).is_none());
    }

    #[test]
    fn retrying_failed_trigger_clears_its_notice() {
        let mut h = Harness::new();
        h.select("photo.png");
        let request = plain(Effect::Sticker);
        let ticket = h.session.begin(request).unwrap();
        h.session.complete(ticket, Err(request.check_status(502).unwrap_err()));
        assert!(h.session.notice().is_some());
        h.session.begin(request).unwrap();
        assert!(h.session.notice().is_none());
    }

    #[test]
    fn sequence_numbers_increase_across_selections() {
        let mut h = Harness::new();
        h.select("a.png");
        let a = h.session.begin(plain(Effect::Manga)).unwrap();
        h.select("b.png");
        let b = h.session.begin(plain(Effect::Manga)).unwrap();
        assert!(b.sequence() > a.sequence());
        assert!(b.generation() > a.generation());
        assert_eq!(b.request(), plain(Effect::Manga));
    }

    #[test]
    fn dropping_the_session_releases_every_handle() {
        let mut h = Harness::new();
        h.select("photo.png");
        let ticket = h.session.begin(plain(Effect::PopArt)).unwrap();
        let handle = h.handle("pop");
        h.session.complete(ticket, Ok(handle));
        assert_eq!(h.released(), 0);

        let released = Rc::clone(&h.released);
        drop(h);
        assert_eq!(released.get(), 2);
    }

    #[test]
    fn other_trigger_keeps_failure_notice() {
        let mut h = Harness::new();
        h.select("photo.png");
        let candy = styled(Effect::StyleTransfer, "candy");
        let ticket = h.session.begin(candy).unwrap();
        h.session
            .complete(ticket, Err(candy.check_status(500).unwrap_err()));

        h.session.begin(styled(Effect::StyleTransfer, "udnie")).unwrap();
        h.session.begin(plain(Effect::Cartoon)).unwrap();
        assert_eq!(h.session.notice().and_then(EffectError::request), Some(candy));
        assert_eq!(h.session.phase(candy), TriggerPhase::Failed);

        h.session.begin(candy).unwrap();
        assert!(h.session.notice().is_none());
    }
}
