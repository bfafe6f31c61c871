use anyhow::{bail, Result};
use tracing::{debug, info};

use appointment_cell::{AppointmentService, BookingOverlay, DoctorDashboard, PatientAppointmentsPage};
use auth_cell::{render_header, FileSessionStore, HeaderOutcome, LoginController, Route, SessionManager};
use doctor_cell::models::DoctorForm;
use doctor_cell::{CardOutcome, DoctorDirectory};
use patient_cell::models::SignupForm;
use shared_config::AppConfig;
use shared_models::auth::{AdminCredentials, EmailCredentials, Role, Session};
use shared_utils::interaction::Interaction;

use crate::cli::{Commands, LoginAccount};
use crate::terminal::Terminal;

pub struct Portal {
    config: AppConfig,
    sessions: SessionManager<FileSessionStore>,
    ui: Terminal,
}

impl Portal {
    pub fn new(config: AppConfig, sessions: SessionManager<FileSessionStore>, ui: Terminal) -> Self {
        Self { config, sessions, ui }
    }

    pub async fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Login { account } => self.login(account).await,
            Commands::Role { role } => {
                let route = self.sessions.select_role(role)?;
                self.open(route)
            }
            Commands::Signup { name, email, password, phone, address } => {
                let form = SignupForm { name, email, password, phone, address };
                let controller = LoginController::new(&self.config, &self.sessions);
                controller.patient_signup(&form, &self.ui).await;
                Ok(())
            }
            Commands::Logout => {
                let route = match self.sessions.session().role {
                    Some(Role::LoggedPatient) => self.sessions.logout_patient()?,
                    _ => self.sessions.logout()?,
                };
                self.open(route)
            }
            Commands::Header { path } => {
                self.header(&path)?;
                Ok(())
            }
            Commands::Doctors { name, time, specialty } => {
                self.doctors(&name, &time, &specialty).await
            }
            Commands::DeleteDoctor { id } => self.delete_doctor(id).await,
            Commands::AddDoctor { name, email, phone, password, specialty, times } => {
                let form = DoctorForm {
                    name,
                    email,
                    phone,
                    password,
                    specialty,
                    available_times: times,
                };
                self.add_doctor(&form).await
            }
            Commands::Book { doctor_id, date, slot } => self.book(doctor_id, date, &slot).await,
            Commands::Appointments { date, patient } => self.appointments(date, patient).await,
            Commands::MyAppointments { condition, name } => {
                self.my_appointments(condition, name).await
            }
        }
    }

    async fn login(&self, account: LoginAccount) -> Result<()> {
        let controller = LoginController::new(&self.config, &self.sessions);
        let route = match account {
            LoginAccount::Admin { username, password } => {
                controller
                    .admin_login(&AdminCredentials { username, password }, &self.ui)
                    .await
            }
            LoginAccount::Doctor { email, password } => {
                controller
                    .doctor_login(&EmailCredentials { email, password }, &self.ui)
                    .await
            }
            LoginAccount::Patient { email, password } => {
                controller
                    .patient_login(&EmailCredentials { email, password }, &self.ui)
                    .await
            }
        };

        match route {
            Some(route) => self.open(route),
            None => bail!("login failed"),
        }
    }

    fn open(&self, route: Route) -> Result<()> {
        info!("Opening {}", route.path());
        self.header(route.path())?;
        Ok(())
    }

    /// Render the header the way a page load would. Returns the session the
    /// page runs with, or `None` after a forced redirect.
    fn header(&self, path: &str) -> Result<Option<Session>> {
        match render_header(path, &self.sessions)? {
            HeaderOutcome::Rendered(header) => {
                println!("{}", header.element().to_text());
                Ok(Some(self.sessions.session()))
            }
            HeaderOutcome::Redirect { to, notice } => {
                self.ui.notify(notice);
                debug!("Redirected to {}", to.path());
                Ok(None)
            }
        }
    }

    fn page(&self, route: Route) -> Result<Session> {
        match self.header(route.path())? {
            Some(session) => Ok(session),
            None => bail!("session expired"),
        }
    }

    fn directory_route(session: &Session) -> Route {
        match session.role {
            Some(Role::Admin) => Route::AdminDashboard,
            Some(Role::LoggedPatient) => Route::LoggedPatientDashboard,
            _ => Route::PatientDashboard,
        }
    }

    fn open_directory(&self) -> Result<DoctorDirectory> {
        let route = Self::directory_route(&self.sessions.session());
        let session = self.page(route)?;
        Ok(DoctorDirectory::new(&self.config, session))
    }

    async fn directory(&self) -> Result<DoctorDirectory> {
        let mut directory = self.open_directory()?;
        directory.load_doctor_cards().await;
        Ok(directory)
    }

    async fn doctors(&self, name: &str, time: &str, specialty: &str) -> Result<()> {
        let mut directory = self.open_directory()?;
        directory.search(name, time, specialty).await;
        println!("{}", directory.render().to_text());
        Ok(())
    }

    async fn delete_doctor(&self, id: i64) -> Result<()> {
        let mut directory = self.directory().await?;
        match directory.activate_card(id, &self.ui).await {
            CardOutcome::NoAction => bail!("no deletable card for doctor {}", id),
            _ => {
                println!("{}", directory.render().to_text());
                Ok(())
            }
        }
    }

    async fn add_doctor(&self, form: &DoctorForm) -> Result<()> {
        let session = self.page(Route::AdminDashboard)?;
        let mut directory = DoctorDirectory::new(&self.config, session);
        let result = directory.add_doctor(form, &self.ui).await;
        if !result.success {
            bail!("{}", result.message);
        }
        println!("{}", directory.render().to_text());
        Ok(())
    }

    async fn book(&self, doctor_id: i64, date: Option<chrono::NaiveDate>, slot: &str) -> Result<()> {
        let mut directory = self.directory().await?;
        let (doctor, patient) = match directory.activate_card(doctor_id, &self.ui).await {
            CardOutcome::OpenBooking { doctor, patient } => (doctor, patient),
            CardOutcome::NoAction => bail!("doctor {} cannot be booked from this dashboard", doctor_id),
            _ => return Ok(()),
        };

        let overlay = BookingOverlay::new(doctor, patient);
        println!("{}", overlay.element().to_text());

        let service = AppointmentService::new(&self.config);
        let result = overlay
            .submit(date, slot, directory.session(), &service, &self.ui)
            .await;
        if !result.success {
            bail!("{}", result.message);
        }
        Ok(())
    }

    async fn appointments(&self, date: Option<chrono::NaiveDate>, patient: Option<String>) -> Result<()> {
        let session = self.page(Route::DoctorDashboard)?;
        let Some(token) = session.token() else {
            bail!("log in as a doctor first");
        };

        let mut dashboard = DoctorDashboard::new(&self.config, token);
        match (date, patient) {
            (Some(date), Some(name)) => {
                dashboard.on_date_change(date).await;
                dashboard.on_search_input(&name).await;
            }
            (Some(date), None) => dashboard.on_date_change(date).await,
            (None, Some(name)) => dashboard.on_search_input(&name).await,
            (None, None) => dashboard.on_today().await,
        }

        println!("Appointments for {}", dashboard.selected_date());
        println!("{}", dashboard.render().to_text());
        Ok(())
    }

    async fn my_appointments(&self, condition: Option<String>, name: Option<String>) -> Result<()> {
        let session = self.page(Route::PatientAppointments)?;
        let mut page = PatientAppointmentsPage::new(&self.config, session);
        page.load().await;

        if condition.is_some() || name.is_some() {
            page.filter(condition.as_deref().unwrap_or(""), name.as_deref().unwrap_or(""))
                .await;
        }

        println!("{}", page.render().to_text());
        Ok(())
    }
}
