pub const ERROR: &str = "Something went wrong. Please try again later.";

pub const ADMIN_ONLY: &str = "❌ Only the admin can do that.";

pub const SEND_START: &str = "Send /start to begin the payment process.";

pub const SEND_SCREENSHOT: &str = "💳 Send a payment screenshot to begin the approval process.";

pub const BANNED_NOTICE: &str = "❌ Your account is banned. Make a new payment and \
    submit the proof; your submission will be reviewed manually.";

pub const ASK_NAME: &str =
    "📝 Please type your full name exactly as it appears on the payment receipt:";

pub const SUBMISSION_RECEIVED: &str = "✅ Payment details received! Your submission is \
    under review. You'll be notified once approved (usually within 24 hours).";

pub const NO_PENDING: &str = "✅ No pending approvals.";

pub const NO_BANNED: &str = "✅ No banned users.";

pub fn welcome(payment_phone: &str) -> String {
    format!(
        "🎉 Welcome to our premium service!\n\n\
         📞 For payments, contact: {}\n\
         💰 Payment instructions:\n\
         - Send the payment\n\
         - Upload a screenshot as proof\n\
         - Provide your full name exactly as on the receipt\n\n\
         ⚡️ 30 days of access after verification",
        payment_phone
    )
}
