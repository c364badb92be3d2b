use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::assessments::domain::{
    AnswerSheet, AssessmentId, AssessmentOrdinal, AssessmentRecord, NewAssessment,
};
use crate::assessments::flow::AssessmentFlow;
use crate::gateway::{AssessmentGateway, GatewayError};
use crate::session::{Identity, SessionContext, UserId};

pub(super) const USER: &str = "stu-001";

/// Assessment store whose reads and writes can be switched to fail.
#[derive(Default)]
pub(super) struct FlakyGateway {
    records: Mutex<Vec<AssessmentRecord>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    inserts: AtomicUsize,
}

impl FlakyGateway {
    pub(super) fn seeded(ordinals: &[AssessmentOrdinal]) -> Self {
        let gateway = Self::default();
        {
            let mut records = gateway.records.lock().expect("records mutex poisoned");
            for (index, ordinal) in ordinals.iter().enumerate() {
                records.push(stored_record(index, *ordinal));
            }
        }
        gateway
    }

    pub(super) fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub(super) fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub(super) fn insert_attempts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub(super) fn records(&self) -> Vec<AssessmentRecord> {
        self.records.lock().expect("records mutex poisoned").clone()
    }
}

#[async_trait]
impl AssessmentGateway for FlakyGateway {
    async fn assessments_for(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<AssessmentRecord>, GatewayError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable("read timed out".to_string()));
        }
        Ok(self
            .records
            .lock()
            .expect("records mutex poisoned")
            .iter()
            .filter(|record| &record.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_assessment(
        &self,
        assessment: NewAssessment,
    ) -> Result<AssessmentRecord, GatewayError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(GatewayError::Rejected(
                "new row violates row-level security policy".to_string(),
            ));
        }

        let mut records = self.records.lock().expect("records mutex poisoned");
        let record = AssessmentRecord {
            id: AssessmentId(format!("rec-{}", records.len() + 1)),
            user_id: assessment.user_id,
            ordinal: assessment.ordinal,
            answers: assessment.answers,
            created_at: Utc::now(),
        };
        records.push(record.clone());
        Ok(record)
    }
}

fn stored_record(index: usize, ordinal: AssessmentOrdinal) -> AssessmentRecord {
    AssessmentRecord {
        id: AssessmentId(format!("seed-{index}")),
        user_id: UserId(USER.to_string()),
        ordinal,
        answers: AnswerSheet::new(),
        created_at: Utc
            .with_ymd_and_hms(2025, 6, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

pub(super) fn attached_session() -> SessionContext {
    SessionContext::attached(Identity::new(USER, Some("asha@example.com".to_string())))
}

pub(super) async fn started_flow(gateway: Arc<FlakyGateway>) -> AssessmentFlow<FlakyGateway> {
    let mut flow = AssessmentFlow::new(gateway, attached_session());
    flow.initialize().await.expect("flow initializes");
    flow
}

/// Pick the first option on every question of the current assessment, ending on the last.
pub(super) fn answer_everything(flow: &mut AssessmentFlow<FlakyGateway>) {
    loop {
        let option = flow
            .current_question()
            .expect("assessment in progress")
            .options[0];
        flow.select_answer(option).expect("listed option accepted");
        if !flow.advance() {
            break;
        }
    }
}
