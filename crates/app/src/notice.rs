//! User notices
//!
//! Short, localized lines printed after an action. The underlying error goes
//! to the log; the user only sees the notice.

use std::fmt;

use clap::ValueEnum;

use crate::{
    api::ApiError,
    domain::orders::models::OrderId,
    flows::{CartViewError, CheckoutError, HistoryError},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Locale {
    En,
    #[default]
    Vi,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    SignedIn { username: String },
    SignedOut,
    NotSignedIn,
    SessionExpired,
    CartUpdated,
    AddedToCart,
    ProductRemoved,
    CartNotLoaded,
    NoSuchLine { position: usize },
    ZeroQuantity,
    MissingCustomer,
    VoucherApplied,
    VoucherRemoved,
    VoucherAlreadyApplied { code: String },
    EmptyVoucherCode,
    EmptyAddress,
    OrderPlaced { order_id: OrderId },
    OrderNotCreated,
    AddressNotAttached { order_id: OrderId },
    OrderCancelled,
    NotCancellable { order_id: OrderId },
    UnknownOrder { order_id: OrderId },
    StatusUpdated,
    RecordDeleted,
    ServerUnreachable,
    RequestFailed,
}

impl Notice {
    /// Text in the given locale.
    #[must_use]
    pub fn text(&self, locale: Locale) -> String {
        match locale {
            Locale::En => self.english(),
            Locale::Vi => self.vietnamese(),
        }
    }

    fn english(&self) -> String {
        match self {
            Self::SignedIn { username } => format!("Signed in as {username}."),
            Self::SignedOut => "Signed out.".to_string(),
            Self::NotSignedIn => "Please sign in first.".to_string(),
            Self::SessionExpired => "Your session has expired. Please sign in again.".to_string(),
            Self::CartUpdated => "Cart updated.".to_string(),
            Self::AddedToCart => "Added to cart.".to_string(),
            Self::ProductRemoved => "Product removed from cart.".to_string(),
            Self::CartNotLoaded => "Could not load your cart.".to_string(),
            Self::NoSuchLine { position } => format!("Your cart has no line #{position}."),
            Self::ZeroQuantity => "Quantity must be at least 1.".to_string(),
            Self::MissingCustomer => "This account cannot place orders.".to_string(),
            Self::VoucherApplied => "Voucher applied.".to_string(),
            Self::VoucherRemoved => "Voucher removed.".to_string(),
            Self::VoucherAlreadyApplied { code } => {
                format!("Voucher {code} is already applied. Remove it first.")
            }
            Self::EmptyVoucherCode => "Please enter a voucher code.".to_string(),
            Self::EmptyAddress => "Please enter a delivery address.".to_string(),
            Self::OrderPlaced { order_id } => format!("Order #{order_id} placed."),
            Self::OrderNotCreated => "Could not place your order. Please try again.".to_string(),
            Self::AddressNotAttached { order_id } => format!(
                "Order #{order_id} was created without an address. Run `checkout retry-address {order_id}`."
            ),
            Self::OrderCancelled => "Order cancelled.".to_string(),
            Self::NotCancellable { order_id } => {
                format!("Order #{order_id} can no longer be cancelled.")
            }
            Self::UnknownOrder { order_id } => format!("Order #{order_id} was not found."),
            Self::StatusUpdated => "Order status updated.".to_string(),
            Self::RecordDeleted => "Deleted.".to_string(),
            Self::ServerUnreachable => "Cannot reach the server. Please try again.".to_string(),
            Self::RequestFailed => "Something went wrong. Please try again.".to_string(),
        }
    }

    fn vietnamese(&self) -> String {
        match self {
            Self::SignedIn { username } => format!("Đã đăng nhập với tên {username}."),
            Self::SignedOut => "Đã đăng xuất.".to_string(),
            Self::NotSignedIn => "Vui lòng đăng nhập trước.".to_string(),
            Self::SessionExpired => {
                "Phiên đăng nhập đã hết hạn. Vui lòng đăng nhập lại.".to_string()
            }
            Self::CartUpdated => "Đã cập nhật giỏ hàng.".to_string(),
            Self::AddedToCart => "Đã thêm vào giỏ hàng.".to_string(),
            Self::ProductRemoved => "Đã xóa sản phẩm khỏi giỏ hàng.".to_string(),
            Self::CartNotLoaded => "Không tải được giỏ hàng.".to_string(),
            Self::NoSuchLine { position } => format!("Giỏ hàng không có dòng #{position}."),
            Self::ZeroQuantity => "Số lượng phải ít nhất là 1.".to_string(),
            Self::MissingCustomer => "Tài khoản này không thể đặt hàng.".to_string(),
            Self::VoucherApplied => "Đã áp dụng mã giảm giá.".to_string(),
            Self::VoucherRemoved => "Đã gỡ mã giảm giá.".to_string(),
            Self::VoucherAlreadyApplied { code } => {
                format!("Mã {code} đã được áp dụng. Hãy gỡ mã trước.")
            }
            Self::EmptyVoucherCode => "Vui lòng nhập mã giảm giá.".to_string(),
            Self::EmptyAddress => "Vui lòng nhập địa chỉ giao hàng.".to_string(),
            Self::OrderPlaced { order_id } => format!("Đã đặt đơn hàng #{order_id}."),
            Self::OrderNotCreated => "Không thể đặt hàng. Vui lòng thử lại.".to_string(),
            Self::AddressNotAttached { order_id } => format!(
                "Đơn hàng #{order_id} đã được tạo nhưng chưa có địa chỉ. Chạy `checkout retry-address {order_id}`."
            ),
            Self::OrderCancelled => "Đã hủy đơn hàng.".to_string(),
            Self::NotCancellable { order_id } => {
                format!("Đơn hàng #{order_id} không thể hủy nữa.")
            }
            Self::UnknownOrder { order_id } => format!("Không tìm thấy đơn hàng #{order_id}."),
            Self::StatusUpdated => "Đã cập nhật trạng thái đơn hàng.".to_string(),
            Self::RecordDeleted => "Đã xóa.".to_string(),
            Self::ServerUnreachable => "Không kết nối được máy chủ. Vui lòng thử lại.".to_string(),
            Self::RequestFailed => "Đã có lỗi xảy ra. Vui lòng thử lại.".to_string(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text(Locale::default()))
    }
}

impl From<&ApiError> for Notice {
    fn from(error: &ApiError) -> Self {
        match error {
            ApiError::Transport(_) => Self::ServerUnreachable,
            ApiError::Status { status: 401, .. } => Self::SessionExpired,
            ApiError::Unauthenticated => Self::NotSignedIn,
            ApiError::Status { .. } | ApiError::Rejected { .. } | ApiError::Decode(_) => {
                Self::RequestFailed
            }
        }
    }
}

impl From<&CartViewError> for Notice {
    fn from(error: &CartViewError) -> Self {
        match error {
            CartViewError::Api(api) => api.into(),
            CartViewError::NotLoaded | CartViewError::UnknownItem(_) => Self::CartNotLoaded,
            CartViewError::MissingCustomer => Self::MissingCustomer,
            CartViewError::Pricing(_) | CartViewError::Amount(_) => Self::RequestFailed,
        }
    }
}

impl From<&CheckoutError> for Notice {
    fn from(error: &CheckoutError) -> Self {
        use pizzeria::vouchers::VoucherError;

        match error {
            CheckoutError::Api(api) => api.into(),
            CheckoutError::Voucher(VoucherError::EmptyCode) => Self::EmptyVoucherCode,
            CheckoutError::Voucher(VoucherError::AlreadyApplied(code)) => {
                Self::VoucherAlreadyApplied { code: code.clone() }
            }
            CheckoutError::NotLoaded => Self::CartNotLoaded,
            CheckoutError::EmptyAddress => Self::EmptyAddress,
            CheckoutError::MissingCustomer => Self::MissingCustomer,
            CheckoutError::CreateOrder(_) => Self::OrderNotCreated,
            CheckoutError::AttachAddress { order_id, .. } => Self::AddressNotAttached {
                order_id: *order_id,
            },
            CheckoutError::Pricing(_) => Self::RequestFailed,
        }
    }
}

impl From<&HistoryError> for Notice {
    fn from(error: &HistoryError) -> Self {
        match error {
            HistoryError::Api(api) => api.into(),
            HistoryError::UnknownOrder(order_id) => Self::UnknownOrder {
                order_id: *order_id,
            },
            HistoryError::NotCancellable { order_id, .. } => Self::NotCancellable {
                order_id: *order_id,
            },
        }
    }
}
