use crate::*;
use chrono::NaiveDate;
use std::cell::RefCell;
use std::rc::Rc;

mod filter;

pub(crate) const DEFAULT_OCCUPATION: [&str; 3] = ["Science", "Biology", "Biologist"];

pub(crate) fn talk(id: u64, duration: u32, tags: &[&str]) -> TalkRecord {
    talk_in(id, duration, tags, DEFAULT_OCCUPATION)
}

pub(crate) fn talk_in(id: u64, duration: u32, tags: &[&str], occupation: [&str; 3]) -> TalkRecord {
    let published = NaiveDate::from_ymd_opt(2007 + (id % 11) as i32, 6, 1).unwrap_or_default();
    TalkRecord::new(
        id,
        format!("Talk {id}"),
        format!("Speaker {id}"),
        occupation,
        100_000 * (id + 1),
        duration,
        published,
        tags.iter().copied(),
        format!("https://talks.example/{id}"),
    )
}

/// Deterministic pseudo-random data set for property checks.
pub(crate) fn generated(n: usize, seed: u64) -> Vec<TalkRecord> {
    const TAGS: [&str; 8] = [
        "science", "technology", "design", "culture", "health", "music", "art", "business",
    ];
    const OCCUPATIONS: [[&str; 3]; 4] = [
        ["Science", "Biology", "Biologist"],
        ["Science", "Physics", "Physicist"],
        ["Arts", "Music", "Composer"],
        ["Arts", "Music", "Singer"],
    ];
    let mut state = seed;
    let mut next = move |m: u64| {
        state = (1_664_525 * state + 1_013_904_223) % (1 << 32);
        (state >> 16) % m
    };
    (0..n as u64)
        .map(|id| {
            let duration = 2 + next(44) as u32;
            let a = TAGS[next(8) as usize];
            let b = TAGS[next(8) as usize];
            let occupation = OCCUPATIONS[next(4) as usize];
            talk_in(id, duration, &[a, b], occupation)
        })
        .collect()
}

pub(crate) fn ids(records: &[&TalkRecord]) -> Vec<u64> {
    records.iter().map(|r| r.id).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Call {
    pub kind: ChartKind,
    pub cause: UpdateCause,
    pub ids: Vec<u64>,
    pub matrix: Option<CooccurrenceMatrix>,
    pub tags: Vec<String>,
    pub path: OccupationPath,
}

pub(crate) type CallLog = Rc<RefCell<Vec<Call>>>;

/// Records every update and answers gestures with a canned outcome.
pub(crate) struct MockChart {
    kind: ChartKind,
    log: CallLog,
    pub outcome: GestureOutcome,
}

impl MockChart {
    pub fn new(kind: ChartKind, log: &CallLog) -> Self {
        Self {
            kind,
            log: Rc::clone(log),
            outcome: GestureOutcome::Ignored,
        }
    }
}

impl ChartAdapter for MockChart {
    fn kind(&self) -> ChartKind {
        self.kind
    }

    fn set_data(&mut self, update: &ChartUpdate<'_>) -> Result<()> {
        self.log.borrow_mut().push(Call {
            kind: self.kind,
            cause: update.cause,
            ids: ids(update.records),
            matrix: update.matrix.cloned(),
            tags: update.selected_tags.to_vec(),
            path: update.path.clone(),
        });
        Ok(())
    }

    fn gesture(&mut self, _gesture: &Gesture) -> GestureOutcome {
        self.outcome.clone()
    }
}

/// A coordinator plus one mock per chart kind sharing a call log.
pub(crate) struct Harness {
    pub coordinator: Coordinator,
    pub charts: Vec<MockChart>,
    pub log: CallLog,
}

impl Harness {
    pub fn new(records: Vec<TalkRecord>) -> Self {
        Self::with_config(records, &DashboardConfig::default())
    }

    pub fn with_config(records: Vec<TalkRecord>, config: &DashboardConfig) -> Self {
        let dataset = Dataset::new(records).unwrap();
        let coordinator = Coordinator::new(dataset, config).unwrap();
        let log: CallLog = Rc::new(RefCell::new(Vec::new()));
        // Deliberately out of dependency order: the coordinator must not rely on slice order.
        let charts = [
            ChartKind::Chord,
            ChartKind::LineChart,
            ChartKind::CirclePack,
            ChartKind::Beeswarm,
        ]
        .into_iter()
        .map(|kind| MockChart::new(kind, &log))
        .collect();
        let mut harness = Self {
            coordinator,
            charts,
            log,
        };
        harness.initialize();
        harness
    }

    fn initialize(&mut self) {
        let mut charts = self
            .charts
            .iter_mut()
            .map(|c| c as &mut dyn ChartAdapter)
            .collect::<Vec<_>>();
        self.coordinator.initialize(&mut charts).unwrap();
    }

    pub fn dispatch(&mut self) -> Result<DispatchReport> {
        let mut charts = self
            .charts
            .iter_mut()
            .map(|c| c as &mut dyn ChartAdapter)
            .collect::<Vec<_>>();
        self.coordinator.dispatch(&mut charts)
    }

    pub fn send(&mut self, event: DashboardEvent) -> DispatchReport {
        self.log.borrow_mut().clear();
        self.coordinator.publish(event);
        self.dispatch().unwrap()
    }

    pub fn chart_mut(&mut self, kind: ChartKind) -> &mut MockChart {
        self.charts
            .iter_mut()
            .find(|c| c.kind == kind)
            .unwrap()
    }

    pub fn route(&mut self, kind: ChartKind, gesture: Gesture) -> (GestureOutcome, DispatchReport) {
        self.log.borrow_mut().clear();
        let mut charts = self
            .charts
            .iter_mut()
            .map(|c| c as &mut dyn ChartAdapter)
            .collect::<Vec<_>>();
        self.coordinator
            .route_gesture(kind, &gesture, &mut charts)
            .unwrap()
    }

    /// The most recent update received by `kind` since the log was last cleared.
    pub fn last(&self, kind: ChartKind) -> Option<Call> {
        self.log
            .borrow()
            .iter()
            .rev()
            .find(|c| c.kind == kind)
            .cloned()
    }

    pub fn kinds(&self) -> Vec<ChartKind> {
        self.log.borrow().iter().map(|c| c.kind).collect()
    }
}
