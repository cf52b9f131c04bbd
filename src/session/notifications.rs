//! Notification settings: per-channel, per-category toggles.
//!
//! Toggles mutate local state only; nothing hits the network until the user
//! explicitly confirms, at which point every flag goes out in one batched
//! `updates.settings` call.

use crate::api::accounts::NotificationFlags;
use crate::api::{ApiClient, ApiError};

/// Notification category. `System` is administrative announcements; the
/// rest mirror the core entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    System,
    Request,
    Requisite,
    Order,
    Chat,
}

pub const CATEGORIES: [Category; 5] = [
    Category::System,
    Category::Request,
    Category::Requisite,
    Category::Order,
    Category::Chat,
];

/// Delivery axis inside a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Enabled,
    Email,
    Telegram,
    Push,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationSettings {
    flags: NotificationFlags,
    dirty: bool,
}

impl NotificationSettings {
    pub fn from_flags(flags: NotificationFlags) -> Self {
        NotificationSettings {
            flags,
            dirty: false,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn master(&self) -> bool {
        self.flags.is_active
    }

    pub fn set_master(&mut self, on: bool) {
        self.flags.is_active = on;
        self.dirty = true;
    }

    fn slot(&mut self, category: Category, channel: Channel) -> &mut bool {
        let f = &mut self.flags;
        match (category, channel) {
            (Category::System, Channel::Enabled) => &mut f.is_system,
            (Category::System, Channel::Email) => &mut f.is_system_email,
            (Category::System, Channel::Telegram) => &mut f.is_system_telegram,
            (Category::System, Channel::Push) => &mut f.is_system_push,
            (Category::Request, Channel::Enabled) => &mut f.is_request,
            (Category::Request, Channel::Email) => &mut f.is_request_email,
            (Category::Request, Channel::Telegram) => &mut f.is_request_telegram,
            (Category::Request, Channel::Push) => &mut f.is_request_push,
            (Category::Requisite, Channel::Enabled) => &mut f.is_requisite,
            (Category::Requisite, Channel::Email) => &mut f.is_requisite_email,
            (Category::Requisite, Channel::Telegram) => &mut f.is_requisite_telegram,
            (Category::Requisite, Channel::Push) => &mut f.is_requisite_push,
            (Category::Order, Channel::Enabled) => &mut f.is_order,
            (Category::Order, Channel::Email) => &mut f.is_order_email,
            (Category::Order, Channel::Telegram) => &mut f.is_order_telegram,
            (Category::Order, Channel::Push) => &mut f.is_order_push,
            (Category::Chat, Channel::Enabled) => &mut f.is_chat,
            (Category::Chat, Channel::Email) => &mut f.is_chat_email,
            (Category::Chat, Channel::Telegram) => &mut f.is_chat_telegram,
            (Category::Chat, Channel::Push) => &mut f.is_chat_push,
        }
    }

    pub fn get(&self, category: Category, channel: Channel) -> bool {
        let f = &self.flags;
        match (category, channel) {
            (Category::System, Channel::Enabled) => f.is_system,
            (Category::System, Channel::Email) => f.is_system_email,
            (Category::System, Channel::Telegram) => f.is_system_telegram,
            (Category::System, Channel::Push) => f.is_system_push,
            (Category::Request, Channel::Enabled) => f.is_request,
            (Category::Request, Channel::Email) => f.is_request_email,
            (Category::Request, Channel::Telegram) => f.is_request_telegram,
            (Category::Request, Channel::Push) => f.is_request_push,
            (Category::Requisite, Channel::Enabled) => f.is_requisite,
            (Category::Requisite, Channel::Email) => f.is_requisite_email,
            (Category::Requisite, Channel::Telegram) => f.is_requisite_telegram,
            (Category::Requisite, Channel::Push) => f.is_requisite_push,
            (Category::Order, Channel::Enabled) => f.is_order,
            (Category::Order, Channel::Email) => f.is_order_email,
            (Category::Order, Channel::Telegram) => f.is_order_telegram,
            (Category::Order, Channel::Push) => f.is_order_push,
            (Category::Chat, Channel::Enabled) => f.is_chat,
            (Category::Chat, Channel::Email) => f.is_chat_email,
            (Category::Chat, Channel::Telegram) => f.is_chat_telegram,
            (Category::Chat, Channel::Push) => f.is_chat_push,
        }
    }

    pub fn set(&mut self, category: Category, channel: Channel, on: bool) {
        *self.slot(category, channel) = on;
        self.dirty = true;
    }

    /// A channel fires only when the master switch, the category's enable
    /// flag and the channel flag are all on.
    pub fn is_effective(&self, category: Category, channel: Channel) -> bool {
        self.master() && self.get(category, Channel::Enabled) && self.get(category, channel)
    }

    /// Push every flag to the server in one call and mark clean.
    pub async fn confirm(&mut self, api: &ApiClient) -> Result<(), ApiError> {
        api.notification_update_settings(&self.flags).await?;
        self.dirty = false;
        Ok(())
    }

    /// One-time telegram binding: returns the external url to open.
    pub async fn telegram_code_url(api: &ApiClient) -> Result<String, ApiError> {
        api.notification_update_code().await
    }
}
