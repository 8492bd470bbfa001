//! Render view - everything a front end needs to draw the current screen.
//!
//! The view is rebuilt from the record after every command and tick. It is
//! a read-only projection; nothing in it feeds back into the record.

use serde::Serialize;

use crate::domain::foundation::SessionId;
use crate::domain::session::{
    CorrectionCode, Phase, PhaseSequencer, ReflectionEntry, SessionRecord, SurveyCategory,
    TextField, TimedWindow, SURVEY_QUESTIONS,
};

/// Actions the participant can take on the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionAction {
    SetIdentity,
    EditText,
    StartTimer,
    AddReflectionEntry,
    AnswerSurvey,
    Advance,
    Export,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityView {
    pub name: String,
    pub participant_id: String,
    pub cohort: String,
    pub editable: bool,
}

/// A text box bound to one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub field: TextField,
    pub value: String,
    pub editable: bool,
    pub words: usize,
    pub chars: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerView {
    pub phase: Phase,
    pub duration_secs: u64,
    pub elapsed_secs: u64,
    pub remaining_secs: u64,
    pub started: bool,
    pub running: bool,
    pub expired: bool,
}

impl From<&TimedWindow> for TimerView {
    fn from(window: &TimedWindow) -> Self {
        Self {
            phase: window.phase(),
            duration_secs: window.duration_secs(),
            elapsed_secs: window.elapsed_secs(),
            remaining_secs: window.remaining_secs(),
            started: window.is_started(),
            running: window.is_running(),
            expired: window.is_expired(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeOption {
    pub code: CorrectionCode,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurveyItemView {
    pub id: &'static str,
    pub category: SurveyCategory,
    pub category_name: &'static str,
    pub prompt: &'static str,
    pub answer: Option<u8>,
}

/// Full render view of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub phase: Phase,
    pub phase_name: &'static str,
    pub phase_index: usize,
    pub finished: bool,
    pub identity: IdentityView,
    pub fields: Vec<FieldView>,
    pub timers: Vec<TimerView>,
    /// Live while `Reflection` is current, frozen once it is left.
    pub reflection_elapsed_secs: u64,
    pub reflection_entries: Vec<ReflectionEntry>,
    pub correction_codes: Vec<CodeOption>,
    pub survey: Vec<SurveyItemView>,
    pub notice: Option<String>,
    pub actions: Vec<SessionAction>,
}

impl SessionView {
    pub fn render(record: &SessionRecord, sequencer: &PhaseSequencer, notice: Option<&str>) -> Self {
        let phase = record.phase();
        let identity = record.identity();

        let fields = TextField::all()
            .iter()
            .map(|&field| {
                let stats = record.text_stats(field);
                FieldView {
                    field,
                    value: record.text(field).to_string(),
                    editable: sequencer.is_editable(record, field),
                    words: stats.words,
                    chars: stats.chars,
                }
            })
            .collect();

        let survey = SURVEY_QUESTIONS
            .iter()
            .map(|q| SurveyItemView {
                id: q.id,
                category: q.category,
                category_name: q.category.display_name(),
                prompt: q.prompt,
                answer: record.survey().get(q.id).map(|s| s.value()),
            })
            .collect();

        Self {
            session_id: record.id(),
            phase,
            phase_name: phase.display_name(),
            phase_index: phase.order_index(),
            finished: record.is_finished(),
            identity: IdentityView {
                name: identity.name.clone(),
                participant_id: identity.participant_id.clone(),
                cohort: identity.cohort_label().to_string(),
                editable: !record.is_finished() && phase == Phase::Identify,
            },
            fields,
            timers: record.windows().into_iter().map(TimerView::from).collect(),
            reflection_elapsed_secs: record.reflection_clock().elapsed_secs(),
            reflection_entries: record.reflection_entries().to_vec(),
            correction_codes: CorrectionCode::all()
                .iter()
                .map(|&code| CodeOption {
                    code,
                    label: code.label(),
                })
                .collect(),
            survey,
            notice: notice.map(str::to_string),
            actions: allowed_actions(record, sequencer),
        }
    }

    /// The field view for one field.
    pub fn field(&self, field: TextField) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.field == field)
    }

    /// The timer view for one timed phase.
    pub fn timer(&self, phase: Phase) -> Option<&TimerView> {
        self.timers.iter().find(|t| t.phase == phase)
    }

    pub fn allows(&self, action: SessionAction) -> bool {
        self.actions.contains(&action)
    }
}

fn allowed_actions(record: &SessionRecord, sequencer: &PhaseSequencer) -> Vec<SessionAction> {
    if record.is_finished() {
        return vec![SessionAction::Export];
    }

    let phase = record.phase();
    let mut actions = Vec::new();

    match phase {
        Phase::Identify => actions.push(SessionAction::SetIdentity),
        Phase::Reflection => {
            actions.push(SessionAction::EditText);
            actions.push(SessionAction::AddReflectionEntry);
        }
        Phase::Survey => actions.push(SessionAction::AnswerSurvey),
        _ => {}
    }

    if phase.is_timed() {
        if sequencer.can_start_timer(record) {
            actions.push(SessionAction::StartTimer);
        }
        if TextField::all()
            .iter()
            .any(|&f| sequencer.is_editable(record, f))
        {
            actions.push(SessionAction::EditText);
        }
    }

    if sequencer.can_advance(record).is_ok() {
        actions.push(SessionAction::Advance);
    }

    actions
}
