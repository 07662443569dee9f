//! File picker with drag and drop.
//!
//! Files are checked against the [`UploadPolicy`] from the name, type and size
//! the browser reports, before any contents are read. Only accepted files are
//! read and handed to `on_upload`; each rejected one gets its own message under
//! the drop zone.

use api::{UploadError, UploadFile, UploadPolicy};
use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;

use crate::i18n::{use_i18n, I18n};
use crate::icons::FaCloudArrowUp;
use crate::Icon;

/// What the browser reports about a picked file before it is read.
pub trait PickedFile {
    fn name(&self) -> String;
    fn content_type(&self) -> String;
    fn size(&self) -> u64;
}

impl PickedFile for FileData {
    fn name(&self) -> String {
        FileData::name(self)
    }

    fn content_type(&self) -> String {
        FileData::content_type(self).unwrap_or_default()
    }

    fn size(&self) -> u64 {
        FileData::size(self)
    }
}

impl PickedFile for UploadFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn content_type(&self) -> String {
        self.content_type.clone()
    }

    fn size(&self) -> u64 {
        UploadFile::size(self)
    }
}

/// Split picked files into accepted ones and per-file rejections.
pub fn partition_files<F: PickedFile>(
    files: Vec<F>,
    policy: &UploadPolicy,
) -> (Vec<F>, Vec<(String, UploadError)>) {
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    for file in files {
        match policy.check_metadata(&file.name(), &file.content_type(), file.size()) {
            Ok(()) => accepted.push(file),
            Err(e) => rejected.push((file.name(), e)),
        }
    }
    (accepted, rejected)
}

pub fn upload_error_text(i18n: &I18n, error: &UploadError) -> String {
    match error {
        UploadError::TooLarge { max_size_mb } => {
            i18n.t_with("upload.too_large", &[("size", &max_size_mb.to_string())])
        }
        UploadError::NotAllowed { accept } => i18n.t_with("upload.not_allowed", &[("accept", accept)]),
    }
}

async fn read_files(files: Vec<FileData>) -> Vec<UploadFile> {
    let mut read = Vec::with_capacity(files.len());
    for file in files {
        let name = PickedFile::name(&file);
        let content_type = PickedFile::content_type(&file);
        match file.read_bytes().await {
            Ok(bytes) => read.push(UploadFile::new(name, content_type, bytes.to_vec())),
            Err(e) => tracing::warn!("Could not read {name}: {e}"),
        }
    }
    read
}

#[component]
pub fn FileUpload(
    policy: UploadPolicy,
    #[props(default)] multiple: bool,
    #[props(default)] disabled: bool,
    on_upload: EventHandler<Vec<UploadFile>>,
) -> Element {
    let i18n = use_i18n();
    let mut dragging = use_signal(|| false);
    let mut rejections = use_signal(Vec::<(String, UploadError)>::new);

    let accept = policy.accept.clone();
    let limits = i18n.t_with(
        "upload.limits",
        &[("size", &policy.max_size_mb.to_string()), ("accept", &accept)],
    );

    let receive = use_callback(move |picked: Vec<FileData>| {
        let policy = policy.clone();
        let mut picked = picked;
        if !multiple {
            picked.truncate(1);
        }
        let (accepted, rejected) = partition_files(picked, &policy);
        rejections.set(rejected);
        if accepted.is_empty() {
            return;
        }
        spawn(async move {
            let files = read_files(accepted).await;
            if !files.is_empty() {
                on_upload.call(files);
            }
        });
    });

    let zone_class = if dragging() {
        "file-upload file-upload--dragging"
    } else {
        "file-upload"
    };

    rsx! {
        div {
            class: "{zone_class}",
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| dragging.set(false),
            ondrop: move |evt: DragEvent| {
                evt.prevent_default();
                dragging.set(false);
                if !disabled {
                    receive.call(evt.files());
                }
            },
            label {
                class: "file-upload__zone",
                Icon { icon: FaCloudArrowUp, width: 24, height: 24 }
                span { class: "file-upload__title", {i18n.t("upload.drop_or_click")} }
                span { class: "file-upload__hint", "{limits}" }
                input {
                    r#type: "file",
                    class: "file-upload__input",
                    multiple,
                    disabled,
                    accept: "{accept}",
                    onchange: move |evt: FormEvent| receive.call(evt.files()),
                }
            }
            for (name, error) in rejections() {
                p {
                    key: "{name}",
                    class: "file-upload__error",
                    "{name}: {upload_error_text(&i18n, &error)}"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_reports_each_rejection() {
        let policy = UploadPolicy::new(1, "image/*,.pdf");
        let files = vec![
            UploadFile::new("photo.jpg", "image/jpeg", vec![0; 10]),
            UploadFile::new("huge.png", "image/png", vec![0; 1024 * 1024 + 1]),
            UploadFile::new("Acta.PDF", "", vec![0; 10]),
            UploadFile::new("notes.txt", "text/plain", vec![0; 10]),
        ];

        let (accepted, rejected) = partition_files(files, &policy);

        let names: Vec<_> = accepted.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["photo.jpg", "Acta.PDF"]);
        assert_eq!(
            rejected,
            vec![
                ("huge.png".to_string(), UploadError::TooLarge { max_size_mb: 1 }),
                (
                    "notes.txt".to_string(),
                    UploadError::NotAllowed { accept: "image/*,.pdf".to_string() }
                ),
            ]
        );
    }

    /// Reported metadata of a file that has not been read.
    struct Unread {
        name: &'static str,
        content_type: &'static str,
        size: u64,
    }

    impl PickedFile for Unread {
        fn name(&self) -> String {
            self.name.to_string()
        }

        fn content_type(&self) -> String {
            self.content_type.to_string()
        }

        fn size(&self) -> u64 {
            self.size
        }
    }

    #[test]
    fn test_oversized_file_is_rejected_from_its_reported_size() {
        let policy = UploadPolicy::new(10, "image/*,application/pdf");
        let picked = vec![
            Unread {
                name: "backup.pdf",
                content_type: "application/pdf",
                size: 6 * 1024 * 1024 * 1024,
            },
            Unread { name: "photo.jpg", content_type: "image/jpeg", size: 2048 },
        ];

        let (accepted, rejected) = partition_files(picked, &policy);

        let names: Vec<_> = accepted.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["photo.jpg"]);
        assert_eq!(
            rejected,
            vec![("backup.pdf".to_string(), UploadError::TooLarge { max_size_mb: 10 })]
        );
    }
}
