//! Report attachments: list, upload, download, delete.

use api::{UploadFile, UploadPolicy};
use dioxus::prelude::*;
use store::ReportAttachment;

use crate::browser;
use crate::client::{use_client, use_config};
use crate::error_message::{error_text, ErrorMessage};
use crate::file_upload::FileUpload;
use crate::i18n::use_i18n;
use crate::icons::{FaDownload, FaTrash};
use crate::loading_states::Spinner;
use crate::Icon;

/// Human file size with binary units: `0 Bytes`, `500 Bytes`, `1.5 KB`, `2 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", UNITS[unit])
}

/// Icon for a MIME type. Spreadsheets and presentations are checked before
/// documents since OOXML types contain `officedocument`.
pub fn file_icon(content_type: &str) -> &'static str {
    let ct = content_type.to_ascii_lowercase();
    if ct.starts_with("image/") {
        "🖼️"
    } else if ct.starts_with("video/") {
        "🎥"
    } else if ct.starts_with("audio/") {
        "🎵"
    } else if ct.contains("pdf") {
        "📄"
    } else if ct.contains("excel") || ct.contains("spreadsheet") {
        "📊"
    } else if ct.contains("powerpoint") || ct.contains("presentation") {
        "📋"
    } else if ct.contains("word") || ct.contains("document") {
        "📝"
    } else if ct.contains("zip") || ct.contains("rar") || ct.contains("compressed") {
        "🗜️"
    } else {
        "📎"
    }
}

/// Attachments of one report. The parent owns the list; every change is
/// reported through `on_change`. With `readonly` only downloads are offered.
#[component]
pub fn AttachmentsManager(
    report_id: i64,
    attachments: Vec<ReportAttachment>,
    on_change: EventHandler<Vec<ReportAttachment>>,
    #[props(default)] readonly: bool,
) -> Element {
    let i18n = use_i18n();
    let client = use_client();
    let policy = UploadPolicy::from(&use_config().uploads);
    let mut uploading = use_signal(|| false);
    let mut busy_ids = use_signal(Vec::<i64>::new);
    let mut errors = use_signal(Vec::<String>::new);

    let upload_client = client.clone();
    let upload_list = attachments.clone();
    let upload_policy = policy.clone();
    let on_upload = move |files: Vec<UploadFile>| {
        let client = upload_client.clone();
        let mut list = upload_list.clone();
        let policy = upload_policy.clone();
        spawn(async move {
            uploading.set(true);
            let names: Vec<String> = files.iter().map(|f| f.name.clone()).collect();
            let results = client.upload_attachments(report_id, files, &policy).await;
            let mut failed = Vec::new();
            for (name, result) in names.into_iter().zip(results) {
                match result {
                    Ok(attachment) => list.push(attachment),
                    Err(e) => failed.push(format!("{name}: {}", error_text(&i18n, &e))),
                }
            }
            errors.set(failed);
            uploading.set(false);
            on_change.call(list);
        });
    };

    let count = attachments.len();

    rsx! {
        div {
            class: "attachments",
            div {
                class: "attachments__header",
                h4 { {i18n.t_with("attachments.title", &[("count", &count.to_string())])} }
                if uploading() {
                    Spinner { class: "spinner--small" }
                }
            }

            if !readonly {
                FileUpload {
                    policy: policy.clone(),
                    multiple: true,
                    disabled: uploading(),
                    on_upload: on_upload,
                }
            }

            for message in errors() {
                ErrorMessage { key: "{message}", message: message.clone() }
            }

            if attachments.is_empty() {
                p {
                    class: "attachments__empty",
                    if readonly {
                        {i18n.t("attachments.none_readonly")}
                    } else {
                        {i18n.t("attachments.none")}
                    }
                }
            }

            ul {
                class: "attachments__list",
                for attachment in attachments.iter().cloned() {
                    AttachmentRow {
                        key: "{attachment.id}",
                        attachment: attachment.clone(),
                        readonly,
                        busy: busy_ids().contains(&attachment.id),
                        on_download: {
                            let client = client.clone();
                            move |a: ReportAttachment| {
                                let client = client.clone();
                                spawn(async move {
                                    match client.download_attachment(report_id, a.id).await {
                                        Ok(download) => browser::save_file(
                                            &a.file_name,
                                            download.content_type.as_deref(),
                                            &download.bytes,
                                        ),
                                        Err(e) => {
                                            tracing::error!("Download of attachment {} failed: {e}", a.id);
                                            errors.set(vec![i18n.t("attachments.download_failed").to_string()]);
                                        }
                                    }
                                });
                            }
                        },
                        on_delete: {
                            let client = client.clone();
                            let list = attachments.clone();
                            move |a: ReportAttachment| {
                                if !browser::confirm(i18n.t("attachments.confirm_delete")) {
                                    return;
                                }
                                let client = client.clone();
                                let list = list.clone();
                                spawn(async move {
                                    busy_ids.write().push(a.id);
                                    match client.delete_attachment(report_id, a.id).await {
                                        Ok(()) => {
                                            errors.set(Vec::new());
                                            on_change.call(list.into_iter().filter(|x| x.id != a.id).collect());
                                        }
                                        Err(e) => {
                                            tracing::error!("Delete of attachment {} failed: {e}", a.id);
                                            errors.set(vec![i18n.t("attachments.delete_failed").to_string()]);
                                        }
                                    }
                                    busy_ids.write().retain(|id| *id != a.id);
                                });
                            }
                        },
                    }
                }
            }
        }
    }
}

#[component]
fn AttachmentRow(
    attachment: ReportAttachment,
    readonly: bool,
    busy: bool,
    on_download: EventHandler<ReportAttachment>,
    on_delete: EventHandler<ReportAttachment>,
) -> Element {
    let i18n = use_i18n();
    let uploaded = i18n.dates().format_date(&attachment.created_at.date());
    let uploaded_label = i18n.t("attachments.uploaded");
    let download = attachment.clone();
    let delete = attachment.clone();

    rsx! {
        li {
            class: "attachment",
            span { class: "attachment__icon", {file_icon(&attachment.content_type)} }
            div {
                class: "attachment__details",
                span { class: "attachment__name", title: "{attachment.file_name}", "{attachment.file_name}" }
                span {
                    class: "attachment__meta",
                    "{format_file_size(attachment.file_size)} • {attachment.content_type} • {uploaded_label} {uploaded}"
                }
            }
            div {
                class: "attachment__actions",
                button {
                    class: "btn btn--outline btn--small",
                    title: i18n.t("attachments.download"),
                    onclick: move |_| on_download.call(download.clone()),
                    Icon { icon: FaDownload, width: 12, height: 12 }
                }
                if !readonly {
                    button {
                        class: "btn btn--danger btn--small",
                        title: i18n.t("common.delete"),
                        disabled: busy,
                        onclick: move |_| on_delete.call(delete.clone()),
                        if busy {
                            Spinner { class: "spinner--small" }
                        } else {
                            Icon { icon: FaTrash, width: 12, height: 12 }
                        }
                    }
                }
            }
        }
    }
}
