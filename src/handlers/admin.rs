//! Admin dashboard pages

use tracing::info;

use crate::models::{Faculty, MessageResponse, RegisterFacultyRequest, Role};
use crate::services::ServiceFactory;
use crate::utils::errors::{EventDeskError, Result};
use crate::utils::helpers::{is_filled, is_valid_email};
use crate::utils::logging::log_user_action;

use super::{authorize, report, report_load, REQUIRED_FIELDS_MESSAGE};

/// Faculty registration form
pub struct RegisterFacultyPage<'a> {
    services: &'a ServiceFactory,
    pub form: RegisterFacultyRequest,
}

impl<'a> RegisterFacultyPage<'a> {
    pub fn new(services: &'a ServiceFactory) -> Self {
        Self {
            services,
            form: RegisterFacultyRequest::default(),
        }
    }

    /// Submit the form; it is reset only when the backend accepts it
    pub async fn submit(&mut self) -> Result<()> {
        let admin = authorize(self.services, Role::Admin)?;

        if let Err(e) = validate(&self.form) {
            report(self.services, &e, REQUIRED_FIELDS_MESSAGE);
            return Err(e);
        }

        let mut request = self.form.clone();
        request.photo = request.photo.filter(|photo| is_filled(photo));

        let response: Option<MessageResponse> =
            match self.services.api.post("/admin/register-faculty", &request).await {
                Ok(response) => response,
                Err(e) => {
                    let e = EventDeskError::from(e);
                    report(self.services, &e, "Failed to register faculty");
                    return Err(e);
                }
            };

        log_user_action(&admin.id, "register_faculty", Some(&request.email));
        self.services.notifications.success(
            response
                .and_then(|r| r.message)
                .unwrap_or_else(|| "Faculty registered successfully! ✅".to_string()),
        );
        self.form = RegisterFacultyRequest::default();
        Ok(())
    }
}

fn validate(form: &RegisterFacultyRequest) -> Result<()> {
    let required = [&form.name, &form.email, &form.contact_no, &form.password];
    if required.iter().any(|field| !is_filled(field)) {
        return Err(EventDeskError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
    }
    if !is_valid_email(&form.email) {
        return Err(EventDeskError::Validation("Please enter a valid email address".to_string()));
    }
    Ok(())
}

/// Faculty directory with deletion
pub struct FacultyListPage<'a> {
    services: &'a ServiceFactory,
    pub faculties: Vec<Faculty>,
}

impl<'a> FacultyListPage<'a> {
    pub fn new(services: &'a ServiceFactory) -> Self {
        Self {
            services,
            faculties: Vec::new(),
        }
    }

    pub async fn load(&mut self) -> Result<()> {
        authorize(self.services, Role::Admin)?;

        match self.services.api.get::<Vec<Faculty>>("/admin/faculties").await {
            Ok(faculties) => {
                self.faculties = faculties;
                Ok(())
            }
            Err(e) => {
                let e = EventDeskError::from(e);
                report_load(self.services, "faculties", &e);
                Err(e)
            }
        }
    }

    /// Delete one faculty account and reload the list
    pub async fn delete(&mut self, faculty_id: &str) -> Result<()> {
        let admin = authorize(self.services, Role::Admin)?;

        let path = format!("/admin/faculty/{}", urlencoding::encode(faculty_id));
        if let Err(e) = self.services.api.delete::<Option<MessageResponse>>(&path).await {
            // The backend's reason is not shown for deletions
            self.services.notifications.error("Failed to delete faculty");
            return Err(e.into());
        }

        info!(faculty_id = faculty_id, "Faculty deleted");
        log_user_action(&admin.id, "delete_faculty", Some(faculty_id));
        self.services.notifications.success("Faculty deleted successfully");
        // A failed reload is reported on its own; the deletion stands
        let _ = self.load().await;
        Ok(())
    }
}
