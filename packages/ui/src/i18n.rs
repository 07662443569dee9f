//! Spanish and English translations.
//!
//! Both tables carry the same keys. A key missing from a table is shown as-is so
//! gaps are visible instead of blank. The chosen locale is persisted under
//! [`LOCALE_KEY`].

use dioxus::prelude::*;
use store::KeyValueStore;

use crate::client::platform_store;
use crate::date_format::DateFormatter;

/// Storage key of the chosen locale.
pub const LOCALE_KEY: &str = "locale";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    pub const ALL: &'static [Locale] = &[Locale::Es, Locale::En];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::En => "en",
        }
    }

    /// Accepts `es`, `en` and regional forms such as `en-US`.
    pub fn from_code(code: &str) -> Option<Self> {
        let lang = code.split(['-', '_']).next().unwrap_or(code);
        match lang.to_ascii_lowercase().as_str() {
            "es" => Some(Locale::Es),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    /// Name of the language in itself.
    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::Es => "Español",
            Locale::En => "English",
        }
    }

    fn table(&self) -> Table {
        match self {
            Locale::Es => ES,
            Locale::En => EN,
        }
    }
}

type Table = &'static [(&'static str, &'static str)];

pub fn translate(locale: Locale, key: &'static str) -> &'static str {
    locale
        .table()
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .unwrap_or(key)
}

/// Replace `{name}` placeholders.
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in args {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}

/// Translation context provided by [`I18nProvider`].
#[derive(Clone, Copy, PartialEq)]
pub struct I18n {
    locale: Signal<Locale>,
}

impl I18n {
    pub fn locale(&self) -> Locale {
        (self.locale)()
    }

    pub fn t(&self, key: &'static str) -> &'static str {
        translate(self.locale(), key)
    }

    pub fn t_with(&self, key: &'static str, args: &[(&str, &str)]) -> String {
        interpolate(self.t(key), args)
    }

    pub fn dates(&self) -> DateFormatter {
        DateFormatter::new(self.locale())
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale.set(locale);
        spawn(async move {
            platform_store().set(LOCALE_KEY, locale.code()).await;
        });
    }
}

pub fn use_i18n() -> I18n {
    use_context::<I18n>()
}

/// Provides [`I18n`]. Starts in `default_locale` and switches to the persisted
/// choice once it has been read.
#[component]
pub fn I18nProvider(#[props(default = "es".to_string())] default_locale: String, children: Element) -> Element {
    let mut locale = use_signal(|| Locale::from_code(&default_locale).unwrap_or_default());

    let _ = use_resource(move || async move {
        if let Some(saved) = platform_store().get(LOCALE_KEY).await {
            match Locale::from_code(&saved) {
                Some(l) => locale.set(l),
                None => tracing::warn!("Ignoring unknown saved locale {saved:?}"),
            }
        }
    });

    use_context_provider(|| I18n { locale });

    rsx! {
        {children}
    }
}

#[rustfmt::skip]
const ES: Table = &[
    ("app.title", "Sistema de Reuniones"),
    ("nav.dashboard", "Inicio"),
    ("nav.persons", "Personas"),
    ("nav.meetings", "Reuniones"),
    ("nav.reports", "Reportes"),
    ("header.welcome", "Bienvenido, {name}"),
    ("header.language", "Idioma"),
    ("auth.logout", "Cerrar sesión"),
    ("login.subtitle", "Inicia sesión para continuar"),
    ("login.username", "Usuario"),
    ("login.password", "Contraseña"),
    ("login.submit", "Iniciar sesión"),
    ("login.signing_in", "Iniciando sesión..."),
    ("login.missing_credentials", "Ingresa usuario y contraseña"),
    ("common.loading", "Cargando..."),
    ("common.retry", "Reintentar"),
    ("common.save", "Guardar"),
    ("common.saving", "Guardando..."),
    ("common.cancel", "Cancelar"),
    ("common.edit", "Editar"),
    ("common.delete", "Eliminar"),
    ("common.view", "Ver"),
    ("common.actions", "Acciones"),
    ("common.confirm_delete", "¿Seguro que deseas eliminar este registro?"),
    ("common.create_first", "Crear el primero"),
    ("common.back_to_list", "Volver a la lista"),
    ("common.created_at", "Creado"),
    ("common.updated_at", "Actualizado"),
    ("common.google_maps_link", "Enlace de Google Maps"),
    ("common.open_map", "Ver en el mapa"),
    ("dashboard.title", "Panel"),
    ("dashboard.welcome", "Resumen de personas y reportes"),
    ("dashboard.total_persons", "Personas registradas"),
    ("dashboard.total_reports", "Reportes registrados"),
    ("dashboard.view_all", "Ver todos"),
    ("dashboard.quick_actions", "Acciones rápidas"),
    ("dashboard.add_person", "Agregar persona"),
    ("dashboard.create_report", "Crear reporte"),
    ("dashboard.recent_reports", "Reportes recientes"),
    ("dashboard.no_reports", "Aún no hay reportes."),
    ("error.load_failed", "No se pudieron cargar los datos. Verifica tu conexión."),
    ("error.not_found", "El registro no existe."),
    ("error.page_title", "Algo salió mal"),
    ("error.page_body", "Ocurrió un error inesperado al mostrar esta página."),
    ("error.reload", "Recargar"),
    ("error.go_home", "Ir al inicio"),
    ("form.missing_fields", "Completa los campos obligatorios: {fields}"),
    ("form.invalid_value", "Valor no válido en {field}"),
    ("form.select_placeholder", "Selecciona una opción"),
    ("persons.title", "Personas"),
    ("persons.new", "Nueva persona"),
    ("persons.edit", "Editar persona"),
    ("persons.empty", "No hay personas registradas."),
    ("person.name", "Nombre"),
    ("person.first_name", "Nombres"),
    ("person.last_name", "Apellidos"),
    ("person.birth_date", "Fecha de nacimiento"),
    ("person.phone", "Teléfono"),
    ("person.home_address", "Dirección"),
    ("meetings.title", "Reuniones recurrentes"),
    ("meetings.new", "Nueva reunión"),
    ("meetings.edit", "Editar reunión"),
    ("meetings.empty", "No hay reuniones registradas."),
    ("meetings.no_persons", "Registra primero a la persona que dirige la reunión."),
    ("meeting.schedule", "Horario"),
    ("meeting.meeting_datetime", "Fecha y hora"),
    ("meeting.leader", "Líder"),
    ("meeting.report_type", "Tipo"),
    ("meeting.periodicity", "Periodicidad"),
    ("meeting.location", "Lugar"),
    ("meeting.description", "Descripción"),
    ("report_type.celula", "Célula"),
    ("report_type.culto", "Culto"),
    ("periodicity.daily", "Diaria"),
    ("periodicity.weekly", "Semanal"),
    ("periodicity.monthly", "Mensual"),
    ("reports.title", "Reportes"),
    ("reports.new", "Nuevo reporte"),
    ("reports.edit", "Editar reporte"),
    ("reports.empty", "No hay reportes registrados."),
    ("report.recurring_meeting", "Reunión"),
    ("report.registration_date", "Fecha de registro"),
    ("report.meeting_datetime", "Fecha de la reunión"),
    ("report.attendees_count", "Asistentes"),
    ("report.leader", "Líder"),
    ("report.leader_phone", "Teléfono del líder"),
    ("report.collaborator", "Colaborador"),
    ("report.location", "Lugar"),
    ("report.collection", "Ofrenda"),
    ("report.collection_amount", "Monto de la ofrenda"),
    ("report.currency", "Moneda"),
    ("report.meeting_info", "Información de la reunión"),
    ("report.leader_info", "Información del líder"),
    ("report.location_info", "Ubicación y ofrenda"),
    ("report.participants_title", "Participantes ({count})"),
    ("report.no_participants", "Sin participantes registrados."),
    ("participant.name", "Nombre del participante"),
    ("participant.add", "Agregar"),
    ("participant.remove", "Quitar"),
    ("participant_type.member", "Miembro"),
    ("participant_type.visitor", "Visita"),
    ("participant_type.participant", "Participante"),
    ("attachments.title", "Archivos adjuntos ({count})"),
    ("attachments.none", "Aún no hay archivos. Sube el primero."),
    ("attachments.none_readonly", "Este reporte no tiene archivos adjuntos."),
    ("attachments.uploaded", "Subido el"),
    ("attachments.download", "Descargar"),
    ("attachments.download_failed", "No se pudo descargar el archivo."),
    ("attachments.confirm_delete", "¿Eliminar este archivo?"),
    ("attachments.delete_failed", "No se pudo eliminar el archivo."),
    ("upload.drop_or_click", "Arrastra archivos aquí o haz clic para elegir"),
    ("upload.limits", "Máximo {size} MB por archivo. Tipos: {accept}"),
    ("upload.too_large", "El archivo supera el máximo de {size} MB"),
    ("upload.not_allowed", "Tipo de archivo no permitido. Permitidos: {accept}"),
];

#[rustfmt::skip]
const EN: Table = &[
    ("app.title", "Gatherings"),
    ("nav.dashboard", "Dashboard"),
    ("nav.persons", "Persons"),
    ("nav.meetings", "Meetings"),
    ("nav.reports", "Reports"),
    ("header.welcome", "Welcome, {name}"),
    ("header.language", "Language"),
    ("auth.logout", "Log out"),
    ("login.subtitle", "Sign in to continue"),
    ("login.username", "Username"),
    ("login.password", "Password"),
    ("login.submit", "Sign in"),
    ("login.signing_in", "Signing in..."),
    ("login.missing_credentials", "Enter username and password"),
    ("common.loading", "Loading..."),
    ("common.retry", "Retry"),
    ("common.save", "Save"),
    ("common.saving", "Saving..."),
    ("common.cancel", "Cancel"),
    ("common.edit", "Edit"),
    ("common.delete", "Delete"),
    ("common.view", "View"),
    ("common.actions", "Actions"),
    ("common.confirm_delete", "Are you sure you want to delete this record?"),
    ("common.create_first", "Create the first one"),
    ("common.back_to_list", "Back to list"),
    ("common.created_at", "Created"),
    ("common.updated_at", "Last updated"),
    ("common.google_maps_link", "Google Maps link"),
    ("common.open_map", "View on map"),
    ("dashboard.title", "Dashboard"),
    ("dashboard.welcome", "Overview of persons and reports"),
    ("dashboard.total_persons", "Registered persons"),
    ("dashboard.total_reports", "Registered reports"),
    ("dashboard.view_all", "View all"),
    ("dashboard.quick_actions", "Quick actions"),
    ("dashboard.add_person", "Add person"),
    ("dashboard.create_report", "Create report"),
    ("dashboard.recent_reports", "Recent reports"),
    ("dashboard.no_reports", "No reports yet."),
    ("error.load_failed", "Could not load data. Check your connection."),
    ("error.not_found", "The record does not exist."),
    ("error.page_title", "Something went wrong"),
    ("error.page_body", "An unexpected error occurred while rendering this page."),
    ("error.reload", "Reload"),
    ("error.go_home", "Go home"),
    ("form.missing_fields", "Fill in the required fields: {fields}"),
    ("form.invalid_value", "Invalid value in {field}"),
    ("form.select_placeholder", "Select an option"),
    ("persons.title", "Persons"),
    ("persons.new", "New person"),
    ("persons.edit", "Edit person"),
    ("persons.empty", "No persons registered."),
    ("person.name", "Name"),
    ("person.first_name", "First name"),
    ("person.last_name", "Last name"),
    ("person.birth_date", "Birth date"),
    ("person.phone", "Phone"),
    ("person.home_address", "Home address"),
    ("meetings.title", "Recurring meetings"),
    ("meetings.new", "New meeting"),
    ("meetings.edit", "Edit meeting"),
    ("meetings.empty", "No meetings registered."),
    ("meetings.no_persons", "Register the person leading the meeting first."),
    ("meeting.schedule", "Schedule"),
    ("meeting.meeting_datetime", "Date and time"),
    ("meeting.leader", "Leader"),
    ("meeting.report_type", "Type"),
    ("meeting.periodicity", "Periodicity"),
    ("meeting.location", "Location"),
    ("meeting.description", "Description"),
    ("report_type.celula", "Cell group"),
    ("report_type.culto", "Service"),
    ("periodicity.daily", "Daily"),
    ("periodicity.weekly", "Weekly"),
    ("periodicity.monthly", "Monthly"),
    ("reports.title", "Reports"),
    ("reports.new", "New report"),
    ("reports.edit", "Edit report"),
    ("reports.empty", "No reports registered."),
    ("report.recurring_meeting", "Meeting"),
    ("report.registration_date", "Registration date"),
    ("report.meeting_datetime", "Meeting date"),
    ("report.attendees_count", "Attendees"),
    ("report.leader", "Leader"),
    ("report.leader_phone", "Leader phone"),
    ("report.collaborator", "Collaborator"),
    ("report.location", "Location"),
    ("report.collection", "Collection"),
    ("report.collection_amount", "Collection amount"),
    ("report.currency", "Currency"),
    ("report.meeting_info", "Meeting information"),
    ("report.leader_info", "Leader information"),
    ("report.location_info", "Location and collection"),
    ("report.participants_title", "Participants ({count})"),
    ("report.no_participants", "No participants recorded."),
    ("participant.name", "Participant name"),
    ("participant.add", "Add"),
    ("participant.remove", "Remove"),
    ("participant_type.member", "Member"),
    ("participant_type.visitor", "Visitor"),
    ("participant_type.participant", "Participant"),
    ("attachments.title", "Attachments ({count})"),
    ("attachments.none", "No files yet. Upload the first one."),
    ("attachments.none_readonly", "This report has no attachments."),
    ("attachments.uploaded", "Uploaded"),
    ("attachments.download", "Download"),
    ("attachments.download_failed", "Could not download the file."),
    ("attachments.confirm_delete", "Delete this file?"),
    ("attachments.delete_failed", "Could not delete the file."),
    ("upload.drop_or_click", "Drop files here or click to choose"),
    ("upload.limits", "Up to {size} MB per file. Types: {accept}"),
    ("upload.too_large", "The file exceeds the {size} MB limit"),
    ("upload.not_allowed", "File type not allowed. Allowed: {accept}"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_tables_have_the_same_keys() {
        let es: BTreeSet<_> = ES.iter().map(|(k, _)| *k).collect();
        let en: BTreeSet<_> = EN.iter().map(|(k, _)| *k).collect();
        assert_eq!(es.len(), ES.len(), "duplicate key in ES");
        assert_eq!(en.len(), EN.len(), "duplicate key in EN");
        assert_eq!(
            es.symmetric_difference(&en).collect::<Vec<_>>(),
            Vec::<&&str>::new()
        );
    }

    #[test]
    fn test_translate_and_fallback() {
        assert_eq!(translate(Locale::Es, "nav.persons"), "Personas");
        assert_eq!(translate(Locale::En, "nav.persons"), "Persons");
        assert_eq!(translate(Locale::En, "no.such.key"), "no.such.key");
    }

    #[test]
    fn test_locale_codes() {
        assert_eq!(Locale::from_code("en-US"), Some(Locale::En));
        assert_eq!(Locale::from_code("ES"), Some(Locale::Es));
        assert_eq!(Locale::from_code("fr"), None);
        assert_eq!(Locale::En.code(), "en");
    }

    #[test]
    fn test_interpolate() {
        let msg = interpolate("File size must be less than {size}MB", &[("size", "10")]);
        assert_eq!(msg, "File size must be less than 10MB");
    }
}
