use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crate::app::domain::selection::SelectionDescriptor;
use crate::app::domain::session::CorrectionSession;
use crate::app::domain::settings::Settings;
use crate::app::domain::suggestions::{ActionMenu, CorrectionResult, FeedbackRecord, RequestKind, Suggestions};
use crate::app::domain::surface::{FocusTarget, PointerPosition};
use crate::app::infrastructure::chrome::PresentationChrome;
use crate::app::infrastructure::host::EditableSurface;
use crate::app::services::field::{get_field_value, set_field_value, WriteOutcome};
use crate::app::services::policy::WritePolicy;
use crate::app::services::selection::SelectionTrigger;
use crate::app::services::suggestions::SuggestionService;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

/// Answer delivered back from a worker thread.
#[derive(Debug)]
pub struct WorkerMessage {
    pub id: RequestId,
    pub payload: Payload,
}

#[derive(Debug)]
pub enum Payload {
    Suggestions(RequestKind, Suggestions),
    WholeField(CorrectionResult),
}

/// The popup currently shown for a selection.
#[derive(Debug, Clone)]
struct OpenPopup {
    selection: SelectionDescriptor,
    menu: ActionMenu,
    offered: Option<(RequestKind, Vec<String>)>,
}

/// Drives one focus → select → suggest → commit cycle at a time.
///
/// Runs on the page's single thread. Service calls go to short-lived worker
/// threads and come back through a channel. Popup requests and the
/// whole-field button each keep their own in-flight slot: only the newest
/// answer per slot is applied, and popup answers only while the popup is
/// still on the page.
pub struct CorrectionController<C: PresentationChrome> {
    session: CorrectionSession,
    policy: WritePolicy,
    service: Arc<SuggestionService>,
    chrome: C,
    sender: Sender<WorkerMessage>,
    receiver: Receiver<WorkerMessage>,
    next_id: u64,
    pending_popup: Option<RequestId>,
    pending_whole_field: Option<RequestId>,
    popup: Option<OpenPopup>,
}

impl<C: PresentationChrome> CorrectionController<C> {
    pub fn new(settings: &Settings, chrome: C) -> Self {
        Self::with_service(
            SuggestionService::from_settings(settings),
            WritePolicy::from_settings(settings),
            chrome,
        )
    }

    pub fn with_service(service: SuggestionService, policy: WritePolicy, chrome: C) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            session: CorrectionSession::new(),
            policy,
            service: Arc::new(service),
            chrome,
            sender,
            receiver,
            next_id: 1,
            pending_popup: None,
            pending_whole_field: None,
            popup: None,
        }
    }

    pub fn session(&self) -> &CorrectionSession {
        &self.session
    }

    pub fn policy(&self) -> &WritePolicy {
        &self.policy
    }

    pub fn chrome(&self) -> &C {
        &self.chrome
    }

    pub fn chrome_mut(&mut self) -> &mut C {
        &mut self.chrome
    }

    /// Candidates currently listed in the popup.
    pub fn offered(&self) -> Option<&[String]> {
        self.popup
            .as_ref()
            .and_then(|p| p.offered.as_ref())
            .map(|(_, list)| list.as_slice())
    }

    /// Focus-in observer. Qualifying surfaces replace the tracked one.
    pub fn on_focus_in(&mut self, element: &FocusTarget, surface: EditableSurface, origin: &str) -> bool {
        let tracked = self.session.on_focus_in(element, surface, origin);
        if tracked {
            self.chrome.show_correct_button();
        }
        tracked
    }

    /// Pointer/key release observer. Opens the popup for a fresh selection
    /// and fires its default action.
    pub fn on_release(&mut self, trigger: SelectionTrigger, at: PointerPosition) -> Option<RequestId> {
        let selection = self.session.capture(trigger)?;
        if self.chrome.popup_exists() {
            return None;
        }

        let menu = ActionMenu::for_selection(&selection);
        self.chrome.show_popup(&selection, &menu, at);
        self.popup = Some(OpenPopup {
            selection,
            menu,
            offered: None,
        });
        self.request(menu.default_action())
    }

    /// Ask the service for `kind` suggestions on the open popup's selection.
    ///
    /// Supersedes any request still in flight.
    pub fn request(&mut self, kind: RequestKind) -> Option<RequestId> {
        let popup = self.popup.as_ref()?;
        if !popup.menu.is_enabled(kind) {
            return None;
        }
        let text = popup.selection.text.clone();

        let id = self.next_request_id();
        self.pending_popup = Some(id);
        let service = Arc::clone(&self.service);
        let sender = self.sender.clone();
        std::thread::spawn(move || {
            let payload = Payload::Suggestions(kind, service.fetch(kind, &text));
            let _ = sender.send(WorkerMessage { id, payload });
        });
        Some(id)
    }

    /// The correct button: send the whole field to `/correct` and replace
    /// its content with the answer.
    pub fn correct_whole_field(&mut self) -> Option<RequestId> {
        let text = get_field_value(&self.session.target()?.surface);

        let id = self.next_request_id();
        self.pending_whole_field = Some(id);
        let service = Arc::clone(&self.service);
        let sender = self.sender.clone();
        std::thread::spawn(move || {
            let payload = Payload::WholeField(service.correct(&text));
            let _ = sender.send(WorkerMessage { id, payload });
        });
        Some(id)
    }

    fn next_request_id(&mut self) -> RequestId {
        let id = RequestId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Apply every answer that has already arrived. Returns how many were applied.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.receiver.try_recv() {
            if self.handle(message) {
                applied += 1;
            }
        }
        applied
    }

    /// Block until the next answer arrives (or `timeout` passes) and apply it.
    ///
    /// Returns whether the answer was applied rather than discarded as stale.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        match self.receiver.recv_timeout(timeout) {
            Ok(message) => self.handle(message),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Apply one worker answer. Stale answers are dropped.
    pub fn handle(&mut self, message: WorkerMessage) -> bool {
        match message.payload {
            Payload::Suggestions(kind, suggestions) => {
                if self.pending_popup != Some(message.id) {
                    tracing::debug!(id = message.id.0, "dropping stale popup answer");
                    return false;
                }
                self.pending_popup = None;
                self.show_answer(kind, suggestions)
            }
            Payload::WholeField(result) => {
                if self.pending_whole_field != Some(message.id) {
                    tracing::debug!(id = message.id.0, "dropping superseded field correction");
                    return false;
                }
                self.pending_whole_field = None;
                set_field_value(&self.session, &mut self.policy, &mut self.chrome, &result.corrected, None);
                true
            }
        }
    }

    fn show_answer(&mut self, kind: RequestKind, suggestions: Suggestions) -> bool {
        if !self.chrome.popup_exists() {
            self.popup = None;
            return false;
        }
        let Some(popup) = self.popup.as_mut() else {
            return false;
        };

        let candidates = suggestions.candidates();
        if candidates.is_empty() {
            self.chrome.render_message(kind, kind.empty_message());
        } else {
            self.chrome.render_suggestions(kind, &candidates);
        }
        popup.offered = Some((kind, candidates));
        true
    }

    /// The user picked the `index`-th listed candidate.
    pub fn choose(&mut self, index: usize) -> Option<WriteOutcome> {
        let popup = self.popup.as_ref()?;
        let (kind, candidates) = popup.offered.as_ref()?;
        let chosen = candidates.get(index)?.clone();
        let kind = *kind;
        let candidates = candidates.clone();
        let selection = popup.selection.clone();
        self.popup = None;

        let outcome = set_field_value(
            &self.session,
            &mut self.policy,
            &mut self.chrome,
            &chosen,
            Some((selection.start, selection.end)),
        );

        if kind.records_feedback() {
            let record = FeedbackRecord {
                original: selection.text,
                suggestions: candidates,
                chosen,
            };
            let service = Arc::clone(&self.service);
            std::thread::spawn(move || service.feedback(&record));
        }

        self.chrome.close_popup();
        self.pending_popup = None;
        Some(outcome)
    }

    /// Click outside the popup: remove it and forget any answer in flight.
    pub fn dismiss_popup(&mut self) {
        self.chrome.remove_anchor();
        self.popup = None;
        self.pending_popup = None;
    }
}
