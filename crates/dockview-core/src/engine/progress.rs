/// Events emitted while a review runs.
#[derive(Debug, Clone)]
pub enum Progress {
    StageStart { name: &'static str },
    StageFinish,

    RecordsStart { total: u64 },
    RecordDone,
    RecordsFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + 'a>;

/// Forwards [`Progress`] events to an optional callback.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn reporter_without_callback_is_silent() {
        ProgressReporter::new().report(Progress::StageFinish);
    }

    #[test]
    fn reporter_forwards_events_in_order() {
        let seen = RefCell::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            seen.borrow_mut().push(format!("{:?}", event));
        }));

        reporter.report(Progress::StageStart { name: "Parse" });
        reporter.report(Progress::RecordsStart { total: 2 });
        reporter.report(Progress::RecordDone);

        drop(reporter);
        assert_eq!(
            seen.into_inner(),
            vec![
                "StageStart { name: \"Parse\" }",
                "RecordsStart { total: 2 }",
                "RecordDone"
            ]
        );
    }
}
