//! Backend commands queued from UI to the auth worker.

pub enum BackendCommand {
    Login {
        email: String,
        password: String,
    },
    SendCode {
        email: String,
    },
    ConfirmCode {
        email: String,
        code: String,
    },
    ResendCode {
        email: String,
    },
    ResetPassword {
        email: String,
        new_password: String,
    },
}
