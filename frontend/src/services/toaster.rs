use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::config::DEFAULT_TOAST_DURATION_MS;
use crate::services::subscription::{Listeners, Subscription};

pub type ToastId = String;

/// Severity of a toast, drives styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastType {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl ToastType {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastType::Info => "toast-info",
            ToastType::Success => "toast-success",
            ToastType::Warning => "toast-warning",
            ToastType::Error => "toast-error",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ToastType::Info => "ℹ️",
            ToastType::Success => "✅",
            ToastType::Warning => "⚠️",
            ToastType::Error => "❌",
        }
    }
}

/// Payload rendered by the toast viewport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToastData {
    #[serde(rename = "type")]
    pub kind: ToastType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismissible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    /// Milliseconds before auto-dismiss
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub data: ToastData,
}

/// Optional settings for [`Toaster::toast`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastOptions {
    pub kind: ToastType,
    pub title: Option<String>,
    /// Falls back to the toaster's default duration
    pub duration: Option<u32>,
}

impl ToastOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: ToastType) -> Self {
        self.kind = kind;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn duration(mut self, duration_ms: u32) -> Self {
        self.duration = Some(duration_ms);
        self
    }
}

/// Ordered queue of pending toasts, oldest first.
///
/// Only owns the list. Auto-dismiss timers live in the viewport that
/// renders it, which calls [`Toaster::remove_toast`] when one fires.
#[derive(Clone)]
pub struct Toaster {
    toasts: Rc<RefCell<Vec<Toast>>>,
    listeners: Listeners<[Toast]>,
    default_duration_ms: u32,
}

impl Toaster {
    pub fn new() -> Self {
        Self::with_default_duration(DEFAULT_TOAST_DURATION_MS)
    }

    pub fn with_default_duration(default_duration_ms: u32) -> Self {
        Self {
            toasts: Rc::new(RefCell::new(Vec::new())),
            listeners: Listeners::new(),
            default_duration_ms,
        }
    }

    /// Queue a dismissible toast and return its ID
    pub fn toast(&self, message: impl Into<String>, options: ToastOptions) -> ToastId {
        let id = Uuid::new_v4().to_string();
        let toast = Toast {
            id: id.clone(),
            data: ToastData {
                kind: options.kind,
                title: options.title,
                description: message.into(),
                dismissible: Some(true),
                progress: None,
                duration: Some(options.duration.unwrap_or(self.default_duration_ms)),
            },
        };

        self.toasts.borrow_mut().push(toast);
        self.notify();
        id
    }

    pub fn info(&self, message: impl Into<String>) -> ToastId {
        self.toast(message, ToastOptions::new().kind(ToastType::Info))
    }

    pub fn success(&self, message: impl Into<String>) -> ToastId {
        self.toast(message, ToastOptions::new().kind(ToastType::Success))
    }

    pub fn warning(&self, message: impl Into<String>) -> ToastId {
        self.toast(message, ToastOptions::new().kind(ToastType::Warning))
    }

    pub fn error(&self, message: impl Into<String>) -> ToastId {
        self.toast(message, ToastOptions::new().kind(ToastType::Error))
    }

    /// Drop the toast with `id`; unknown IDs are ignored
    pub fn remove_toast(&self, id: &str) {
        let removed = {
            let mut toasts = self.toasts.borrow_mut();
            let before = toasts.len();
            toasts.retain(|toast| toast.id != id);
            toasts.len() != before
        };

        if removed {
            self.notify();
        }
    }

    /// Pending toasts in insertion order
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.toasts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Called with the full pending list after every change
    pub fn subscribe(&self, handler: impl Fn(&[Toast]) + 'static) -> Subscription {
        self.listeners.add(handler)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.toasts, &other.toasts)
    }

    fn notify(&self) {
        let snapshot = self.toasts();
        self.listeners.emit(&snapshot);
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Toaster {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl std::fmt::Debug for Toaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toaster")
            .field("pending", &self.len())
            .field("default_duration_ms", &self.default_duration_ms)
            .finish()
    }
}
