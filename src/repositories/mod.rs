//! # Repository Layer
//!
//! This module contains the generic tenant-scoped repository and the thin
//! domain specializations layered on top of it. Every repository takes the
//! request's [`TenantContext`](crate::tenant::TenantContext) explicitly;
//! there is no ambient tenant state.

pub mod course;
pub mod enrollment;
pub mod lesson;
pub mod lesson_item;
pub mod organization;
pub mod progress;
pub mod scoped;
pub mod user;

pub use course::{CourseRepository, CreateCourseRequest, UpdateCourseRequest};
pub use enrollment::EnrollmentRepository;
pub use lesson::{CreateLessonRequest, LessonRepository, UpdateLessonRequest};
pub use lesson_item::{CreateLessonItemRequest, LessonItemRepository, UpdateLessonItemRequest};
pub use organization::{CreateOrganizationRequest, OrganizationRepository};
pub use progress::ProgressRepository;
pub use scoped::{ScopedRepository, UnitOfWork};
pub use user::{CreateUserRequest, UserRepository};
