use chrono::Utc;
use tracing::{info, warn};

use super::commands::students::CreateStudentCommand;
use super::error::{DomainError, DomainResult};
use super::models::DomainStudent;
use super::validation::required_text;
use crate::storage::{PaymentRepository, StudentRepository};

const MAX_NAME_LEN: usize = 100;
const MAX_PHONE_LEN: usize = 32;

/// Service for creating and loading students together with their payments
#[derive(Clone)]
pub struct StudentService {
    students: StudentRepository,
    payments: PaymentRepository,
}

impl StudentService {
    pub fn new(students: StudentRepository, payments: PaymentRepository) -> Self {
        Self { students, payments }
    }

    pub async fn create_student(&self, command: CreateStudentCommand) -> DomainResult<DomainStudent> {
        let name = required_text(&command.name, "Student name", MAX_NAME_LEN)?;
        let phone = required_text(&command.phone, "Phone", MAX_PHONE_LEN)?;

        let student = self.students.create_student(&name, &phone, Utc::now()).await?;
        info!("Created student: {} with ID: {}", student.name, student.id);

        Ok(student)
    }

    /// Load one student with its full payment history, or None if absent
    pub async fn load_student(&self, student_id: i64) -> DomainResult<Option<DomainStudent>> {
        let Some(mut student) = self.students.get_student(student_id).await? else {
            return Ok(None);
        };
        student.payments = self.payments.list_for_student(student_id).await?;
        Ok(Some(student))
    }

    pub async fn student_exists(&self, student_id: i64) -> DomainResult<bool> {
        Ok(self.students.get_student(student_id).await?.is_some())
    }

    pub async fn get_student(&self, student_id: i64) -> DomainResult<DomainStudent> {
        self.load_student(student_id).await?.ok_or_else(|| {
            warn!("Student not found: {}", student_id);
            DomainError::not_found(format!("Student not found: {student_id}"))
        })
    }

    /// All students with their payments
    pub async fn list_students(&self) -> DomainResult<Vec<DomainStudent>> {
        let mut students = self.students.list_students().await?;
        let mut payments = self.payments.list_grouped_by_student().await?;

        for student in &mut students {
            student.payments = payments.remove(&student.id).unwrap_or_default();
        }

        info!("Found {} students", students.len());
        Ok(students)
    }
}
