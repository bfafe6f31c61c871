use tracing::{debug, warn};

use shared_models::auth::Role;
use shared_utils::interaction::Notice;
use shared_utils::markup::Element;

use crate::session::SessionManager;
use crate::store::{SessionError, SessionStore};

pub const SESSION_EXPIRED: &str = "Session expired or invalid login. Please log in again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Root,
    AdminDashboard,
    DoctorDashboard,
    PatientDashboard,
    LoggedPatientDashboard,
    PatientAppointments,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::AdminDashboard => "/adminDashboard",
            Route::DoctorDashboard => "/doctorDashboard",
            Route::PatientDashboard => "/pages/patientDashboard.html",
            Route::LoggedPatientDashboard => "/pages/loggedPatientDashboard.html",
            Route::PatientAppointments => "/pages/patientAppointments.html",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let route = match path {
            "/" | "" => Route::Root,
            "/adminDashboard" => Route::AdminDashboard,
            "/doctorDashboard" => Route::DoctorDashboard,
            "/pages/patientDashboard.html" => Route::PatientDashboard,
            "/pages/loggedPatientDashboard.html" => Route::LoggedPatientDashboard,
            "/pages/patientAppointments.html" => Route::PatientAppointments,
            _ => return None,
        };
        Some(route)
    }

    pub fn dashboard_for(role: Role) -> Self {
        match role {
            Role::Admin => Route::AdminDashboard,
            Role::Doctor => Route::DoctorDashboard,
            Role::Patient => Route::PatientDashboard,
            Role::LoggedPatient => Route::LoggedPatientDashboard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    AddDoctor,
    PatientLogin,
    PatientSignup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    AddDoctor,
    DoctorHome,
    Logout,
    PatientLogin,
    PatientSignup,
    PatientHome,
    PatientAppointments,
    PatientLogout,
}

impl NavItem {
    pub fn for_role(role: Option<Role>) -> Vec<NavItem> {
        match role {
            Some(Role::Admin) => vec![NavItem::AddDoctor, NavItem::Logout],
            Some(Role::Doctor) => vec![NavItem::DoctorHome, NavItem::Logout],
            Some(Role::Patient) => vec![NavItem::PatientLogin, NavItem::PatientSignup],
            Some(Role::LoggedPatient) => vec![
                NavItem::PatientHome,
                NavItem::PatientAppointments,
                NavItem::PatientLogout,
            ],
            None => Vec::new(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NavItem::AddDoctor => "Add Doctor",
            NavItem::DoctorHome | NavItem::PatientHome => "Home",
            NavItem::Logout | NavItem::PatientLogout => "Logout",
            NavItem::PatientLogin => "Login",
            NavItem::PatientSignup => "Sign Up",
            NavItem::PatientAppointments => "Appointments",
        }
    }

    fn element(&self) -> Element {
        match self {
            NavItem::Logout | NavItem::PatientLogout => {
                Element::new("a").attr("href", "#").text(self.label())
            }
            NavItem::AddDoctor => Element::new("button")
                .attr("id", "addDocBtn")
                .class("adminBtn")
                .text(self.label()),
            NavItem::PatientLogin => Element::new("button")
                .attr("id", "patientLogin")
                .class("adminBtn")
                .text(self.label()),
            NavItem::PatientSignup => Element::new("button")
                .attr("id", "patientSignup")
                .class("adminBtn")
                .text(self.label()),
            NavItem::PatientHome => Element::new("button")
                .attr("id", "home")
                .class("adminBtn")
                .text(self.label()),
            NavItem::PatientAppointments => Element::new("button")
                .attr("id", "patientAppointments")
                .class("adminBtn")
                .text(self.label()),
            NavItem::DoctorHome => Element::new("button").class("adminBtn").text(self.label()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Navigate(Route),
    OpenModal(Modal),
}

/// Apply a header item. Logout items clear the session before navigating.
pub fn follow<S: SessionStore>(
    item: NavItem,
    sessions: &SessionManager<S>,
) -> Result<NavTarget, SessionError> {
    let target = match item {
        NavItem::AddDoctor => NavTarget::OpenModal(Modal::AddDoctor),
        NavItem::PatientLogin => NavTarget::OpenModal(Modal::PatientLogin),
        NavItem::PatientSignup => NavTarget::OpenModal(Modal::PatientSignup),
        NavItem::DoctorHome => NavTarget::Navigate(sessions.select_role(Role::Doctor)?),
        NavItem::PatientHome => NavTarget::Navigate(Route::LoggedPatientDashboard),
        NavItem::PatientAppointments => NavTarget::Navigate(Route::PatientAppointments),
        NavItem::Logout => NavTarget::Navigate(sessions.logout()?),
        NavItem::PatientLogout => NavTarget::Navigate(sessions.logout_patient()?),
    };
    Ok(target)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    nav: Option<Vec<NavItem>>,
}

impl Header {
    /// Logo only, as shown on the role picker.
    pub fn logo_only() -> Self {
        Self { nav: None }
    }

    pub fn with_nav(items: Vec<NavItem>) -> Self {
        Self { nav: Some(items) }
    }

    pub fn nav_items(&self) -> &[NavItem] {
        self.nav.as_deref().unwrap_or(&[])
    }

    pub fn element(&self) -> Element {
        let logo = Element::new("div")
            .class("logo-section")
            .child(
                Element::new("img")
                    .attr("src", "/assets/images/logo/logo.png")
                    .attr("alt", "Hospital CRM Logo")
                    .class("logo-img"),
            )
            .child(Element::new("span").class("logo-title").text("Hospital CMS"));

        let header = Element::new("header").class("header").child(logo);
        match &self.nav {
            Some(items) => header.child(Element::new("nav").children(items.iter().map(NavItem::element))),
            None => header,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HeaderOutcome {
    Rendered(Header),
    Redirect { to: Route, notice: Notice },
}

/// Header for the page at `path`. Entering the root page always resets to
/// anonymous; a privileged role without a token is cleared and redirected.
pub fn render_header<S: SessionStore>(
    path: &str,
    sessions: &SessionManager<S>,
) -> Result<HeaderOutcome, SessionError> {
    if path.is_empty() || path.ends_with('/') {
        debug!("Root page, clearing session");
        sessions.clear()?;
        return Ok(HeaderOutcome::Rendered(Header::logo_only()));
    }

    let (session, cleared) = sessions.enforce()?;
    if cleared {
        warn!("Redirecting {} to root after invalid session", path);
        return Ok(HeaderOutcome::Redirect {
            to: Route::Root,
            notice: Notice::error(SESSION_EXPIRED),
        });
    }

    Ok(HeaderOutcome::Rendered(Header::with_nav(NavItem::for_role(session.role))))
}
