use std::sync::Arc;

use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use uuid::Uuid;

use crate::{
    domain::{
        age_on, mint_student_id, Application, ApplicationStatus, Level, ParentContact, Student,
    },
    error::{AppError, Result},
    integrations::{IntegrationEvent, IntegrationManager},
    repository::{ApplicationRepository, StudentRepository},
};

pub const CREDENTIAL_LENGTH: usize = 8;

#[derive(Debug, Clone)]
pub struct AcceptanceOutcome {
    pub application: Application,
    pub student: Student,
}

/// Promotes a pending application into an accepted one plus a student record.
///
/// The application update and the student insert are two independent writes
/// with no transaction between them: a crash after the first leaves an
/// Accepted application without a student. Likewise nothing claims the
/// application first, so two concurrent accepts each mint credentials and a
/// student. Both are preserved behaviors of the system this replaces.
pub struct EnrollmentService {
    applications: Arc<dyn ApplicationRepository>,
    students: Arc<dyn StudentRepository>,
    integration_manager: Arc<IntegrationManager>,
    student_id_prefix: String,
    default_region: String,
}

impl EnrollmentService {
    pub fn new(
        applications: Arc<dyn ApplicationRepository>,
        students: Arc<dyn StudentRepository>,
        integration_manager: Arc<IntegrationManager>,
        student_id_prefix: String,
        default_region: String,
    ) -> Self {
        Self {
            applications,
            students,
            integration_manager,
            student_id_prefix,
            default_region,
        }
    }

    pub async fn accept(&self, id: Uuid) -> Result<AcceptanceOutcome> {
        let mut application = self
            .applications
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

        application.status = ApplicationStatus::Accepted;
        application.login_email = Some(application.email.clone());
        application.login_password = Some(generate_credential(CREDENTIAL_LENGTH));
        let application = self.applications.update(id, application).await?;

        let now = Utc::now();
        let student = Student {
            id: mint_student_id(&self.student_id_prefix, now),
            name: application.child_name.clone(),
            age: age_on(application.dob, now.date_naive()),
            class: application.program.clone(),
            level: Level::from_program(&application.program),
            region: self.default_region.clone(),
            parent: ParentContact {
                name: application.parent_name.clone(),
                phone: application.phone.clone(),
                email: application.email.clone(),
            },
            enrollment_date: now,
            attendance: "100%".to_string(),
            photo: None,
            report_card: Vec::new(),
        };
        let student = self.students.create(student).await?;

        // Mail is advisory; a failed send never unwinds the writes above.
        self.integration_manager
            .handle_event(IntegrationEvent::ApplicationAccepted {
                application: application.clone(),
                student: student.clone(),
            })
            .await;

        Ok(AcceptanceOutcome {
            application,
            student,
        })
    }
}

/// One-time parent-portal password: 8 alphanumeric characters from the
/// thread-local CSPRNG.
pub fn generate_credential(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_is_alphanumeric_and_fixed_length() {
        let credential = generate_credential(CREDENTIAL_LENGTH);
        assert_eq!(credential.len(), CREDENTIAL_LENGTH);
        assert!(credential.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn credentials_are_fresh_per_call() {
        // Collisions across a handful of draws would mean the generator is
        // not actually sampling.
        let a = generate_credential(CREDENTIAL_LENGTH);
        let b = generate_credential(CREDENTIAL_LENGTH);
        let c = generate_credential(CREDENTIAL_LENGTH);
        assert!(a != b || b != c);
    }
}
