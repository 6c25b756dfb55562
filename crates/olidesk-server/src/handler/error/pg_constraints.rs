//! Per-table constraint violation to HTTP error conversions.

use olidesk_postgres::types::{
    ClientConstraints, FormConstraints, FormTechnicianConstraints, MemberConstraints,
    UserConstraints,
};

use crate::handler::{Error, ErrorKind};

impl From<UserConstraints> for Error<'static> {
    fn from(c: UserConstraints) -> Self {
        let error = match c {
            UserConstraints::NameNotEmpty => ErrorKind::BadRequest.with_message("name is required"),
            UserConstraints::EmailNotEmpty => {
                ErrorKind::BadRequest.with_message("email is required")
            }
            UserConstraints::EmailUnique => {
                ErrorKind::Conflict.with_message("duplicated email or username")
            }
        };

        error.with_resource("user")
    }
}

impl From<MemberConstraints> for Error<'static> {
    fn from(c: MemberConstraints) -> Self {
        let error = match c {
            MemberConstraints::RoleNotEmpty => {
                ErrorKind::BadRequest.with_message("role is required")
            }
            MemberConstraints::UserIdUnique => {
                ErrorKind::Conflict.with_message("user already has a member profile")
            }
            MemberConstraints::UserIdFkey => ErrorKind::InternalServerError.into_error(),
        };

        error.with_resource("member")
    }
}

impl From<ClientConstraints> for Error<'static> {
    fn from(c: ClientConstraints) -> Self {
        let error = match c {
            ClientConstraints::LatitudeRange | ClientConstraints::LongitudeRange => {
                ErrorKind::BadGateway.with_message("geocoding returned coordinates out of range")
            }
        };

        error.with_resource("client")
    }
}

impl From<FormConstraints> for Error<'static> {
    fn from(c: FormConstraints) -> Self {
        let error = match c {
            FormConstraints::ClientIdFkey => ErrorKind::Conflict
                .with_message("client is referenced by existing forms or no longer exists"),
        };

        error.with_resource("client")
    }
}

impl From<FormTechnicianConstraints> for Error<'static> {
    fn from(c: FormTechnicianConstraints) -> Self {
        let error = match c {
            FormTechnicianConstraints::MemberIdFkey => {
                ErrorKind::BadRequest.with_message("invalid technician responsible ID")
            }
            FormTechnicianConstraints::PrimaryKey => {
                ErrorKind::BadRequest.with_message("technician listed more than once")
            }
            FormTechnicianConstraints::FormIdFkey => ErrorKind::NotFound.with_message("form not found"),
        };

        error.with_resource("form")
    }
}

#[cfg(test)]
mod tests {
    use olidesk_postgres::types::ConstraintViolation;

    use super::*;

    #[test]
    fn duplicate_email_is_conflict() {
        let error = Error::from(ConstraintViolation::User(UserConstraints::EmailUnique));
        assert_eq!(error.kind(), ErrorKind::Conflict);
        assert_eq!(error.message(), Some("duplicated email or username"));
    }

    #[test]
    fn referenced_client_is_conflict() {
        let error = Error::from(ConstraintViolation::Form(FormConstraints::ClientIdFkey));
        assert_eq!(error.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn unknown_technician_is_bad_request() {
        let error = Error::from(ConstraintViolation::FormTechnician(
            FormTechnicianConstraints::MemberIdFkey,
        ));
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.resource(), Some("form"));
    }
}
