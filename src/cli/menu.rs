//! Interactive menus
//!
//! Two nested loops: the main menu while nobody is logged in, and the session
//! menu for an authenticated user. Domain errors are printed and the loop
//! carries on; end of input ends the program from either loop.

use std::io::{BufRead, Write};

use crate::config::Settings;
use crate::display::{format_dashboard, format_history};
use crate::error::{SonnicError, SonnicResult};
use crate::models::{Account, TransactionKind};
use crate::reports::DashboardReport;
use crate::services::{AccountService, Clock, LedgerService, SessionController, SystemClock};
use crate::storage::Storage;

use super::prompt::Console;

/// Options on the main (logged-out) menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    Register,
    Login,
    Exit,
}

impl MainChoice {
    pub fn parse(input: &str) -> SonnicResult<Self> {
        match input.trim() {
            "1" => Ok(Self::Register),
            "2" => Ok(Self::Login),
            "3" => Ok(Self::Exit),
            other => Err(SonnicError::InvalidOption(other.to_string())),
        }
    }
}

/// Options on the session (logged-in) menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChoice {
    Deposit,
    Withdraw,
    Dashboard,
    DepositHistory,
    WithdrawHistory,
    FullHistory,
    ChangePassword,
    Logout,
}

impl SessionChoice {
    pub fn parse(input: &str) -> SonnicResult<Self> {
        match input.trim() {
            "1" => Ok(Self::Deposit),
            "2" => Ok(Self::Withdraw),
            "3" => Ok(Self::Dashboard),
            "4" => Ok(Self::DepositHistory),
            "5" => Ok(Self::WithdrawHistory),
            "6" => Ok(Self::FullHistory),
            "7" => Ok(Self::ChangePassword),
            "8" => Ok(Self::Logout),
            other => Err(SonnicError::InvalidOption(other.to_string())),
        }
    }
}

const MAIN_MENU: &str = "\n===== Sonnic Tracker =====\n\
                         1. Register\n\
                         2. Login\n\
                         3. Exit";

const SESSION_MENU: &str = "\n===== Menu =====\n\
                            1. Deposit\n\
                            2. Withdraw\n\
                            3. Dashboard\n\
                            4. Deposit History\n\
                            5. Withdraw History\n\
                            6. View Full Report\n\
                            7. Change Password\n\
                            8. Logout";

/// Whether a menu action left input to keep reading
enum Step {
    Continue,
    EndOfInput,
}

/// How the session menu was left
enum SessionExit {
    Logout,
    EndOfInput,
}

/// The interactive application
pub struct App<'a, R, W> {
    storage: &'a Storage,
    settings: &'a Settings,
    clock: &'a dyn Clock,
    console: Console<R, W>,
}

impl<'a, R: BufRead, W: Write> App<'a, R, W> {
    pub fn new(storage: &'a Storage, settings: &'a Settings, console: Console<R, W>) -> Self {
        Self {
            storage,
            settings,
            clock: &SystemClock,
            console,
        }
    }

    /// Use a custom date source for new ledger entries
    pub fn with_clock(mut self, clock: &'a dyn Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Run until the user exits or input ends
    pub fn run(&mut self) -> SonnicResult<()> {
        let mut session = SessionController::new(self.storage, self.settings);

        if let Some(user) = session.resume()?.user().map(str::to_string) {
            self.console
                .say(&format!("\nWelcome back, {} (auto-login)!", user))?;
            if let SessionExit::EndOfInput = self.session_menu(&mut session, &user)? {
                return Ok(());
            }
        }

        loop {
            self.console.say(MAIN_MENU)?;
            let Some(choice) = self.console.read_line("Choose an option: ")? else {
                return Ok(());
            };

            let outcome = match MainChoice::parse(&choice) {
                Ok(MainChoice::Register) => self.register(),
                Ok(MainChoice::Login) => self.login(&mut session),
                Ok(MainChoice::Exit) => {
                    self.console.say("Goodbye!")?;
                    return Ok(());
                }
                Err(e) => Err(e),
            };

            if let Step::EndOfInput = self.settle(outcome)? {
                return Ok(());
            }
        }
    }

    fn session_menu(
        &mut self,
        session: &mut SessionController<'a>,
        user: &str,
    ) -> SonnicResult<SessionExit> {
        let account = AccountService::new(self.storage, self.settings).lookup(user)?;

        loop {
            self.console.say(SESSION_MENU)?;
            let Some(choice) = self.console.read_line("Choose an option: ")? else {
                return Ok(SessionExit::EndOfInput);
            };

            let outcome = match SessionChoice::parse(&choice) {
                Ok(SessionChoice::Deposit) => self.add_transaction(&account, TransactionKind::Deposit),
                Ok(SessionChoice::Withdraw) => {
                    self.add_transaction(&account, TransactionKind::Withdraw)
                }
                Ok(SessionChoice::Dashboard) => self.dashboard(&account),
                Ok(SessionChoice::DepositHistory) => {
                    self.history(&account, Some(TransactionKind::Deposit))
                }
                Ok(SessionChoice::WithdrawHistory) => {
                    self.history(&account, Some(TransactionKind::Withdraw))
                }
                Ok(SessionChoice::FullHistory) => self.history(&account, None),
                Ok(SessionChoice::ChangePassword) => self.change_password(user),
                Ok(SessionChoice::Logout) => {
                    session.logout()?;
                    self.console.say("Logged out successfully.")?;
                    return Ok(SessionExit::Logout);
                }
                Err(e) => Err(e),
            };

            if let Step::EndOfInput = self.settle(outcome)? {
                return Ok(SessionExit::EndOfInput);
            }
        }
    }

    /// Print a failed action's error and keep the loop going
    fn settle(&mut self, outcome: SonnicResult<Step>) -> SonnicResult<Step> {
        match outcome {
            Ok(step) => Ok(step),
            Err(e) if e.is_recoverable() => {
                self.console.say(&e.to_string())?;
                Ok(Step::Continue)
            }
            Err(e) => {
                log::error!("{}", e);
                self.console.say(&format!("Error: {}", e))?;
                Ok(Step::Continue)
            }
        }
    }

    fn register(&mut self) -> SonnicResult<Step> {
        let service = AccountService::new(self.storage, self.settings);

        let Some(name) = self.console.read_line("Enter your name: ")? else {
            return Ok(Step::EndOfInput);
        };
        if service.exists(&name)? {
            return Err(SonnicError::AlreadyExists(name));
        }

        let Some(password) = self.console.read_password("Set your password: ")? else {
            return Ok(Step::EndOfInput);
        };
        let symbol = &self.settings.currency_symbol;
        let Some(daily_goal) = self
            .console
            .read_amount(&format!("Daily saving goal ({}): ", symbol))?
        else {
            return Ok(Step::EndOfInput);
        };
        let Some(target) = self
            .console
            .read_amount(&format!("Total target ({}): ", symbol))?
        else {
            return Ok(Step::EndOfInput);
        };

        let account = service.register(&name, &password, daily_goal, target)?;
        self.console
            .say(&format!("\nRegistration successful, {}!", account.name))?;
        Ok(Step::Continue)
    }

    fn login(&mut self, session: &mut SessionController<'a>) -> SonnicResult<Step> {
        let Some(name) = self.console.read_line("Enter your name: ")? else {
            return Ok(Step::EndOfInput);
        };
        let Some(password) = self.console.read_password("Enter your password: ")? else {
            return Ok(Step::EndOfInput);
        };

        session.login(&name, &password)?;
        self.console.say(&format!("\nWelcome back, {}!", name))?;

        match self.session_menu(session, &name)? {
            SessionExit::Logout => Ok(Step::Continue),
            SessionExit::EndOfInput => Ok(Step::EndOfInput),
        }
    }

    fn add_transaction(&mut self, account: &Account, kind: TransactionKind) -> SonnicResult<Step> {
        let ledger = LedgerService::with_clock(self.storage, self.clock);

        let prompt = format!(
            "Enter amount to {}: {}",
            kind.as_str(),
            self.settings.currency_symbol
        );
        let Some(amount) = self.console.read_amount(&prompt)? else {
            return Ok(Step::EndOfInput);
        };

        // Fail before asking for a note
        ledger.check_append(account, kind, amount)?;

        let mut note = None;
        if kind == TransactionKind::Withdraw {
            let Some(reason) = self
                .console
                .read_line("Why are you withdrawing? (optional): ")?
            else {
                return Ok(Step::EndOfInput);
            };
            note = Some(reason);
        }

        let txn = ledger.append(account, kind, amount, note.as_deref())?;
        self.console.say(&format!(
            "{} of {} added on {}.",
            txn.kind,
            self.settings.format_amount(txn.amount),
            txn.date.format(&self.settings.date_format)
        ))?;
        Ok(Step::Continue)
    }

    fn dashboard(&mut self, account: &Account) -> SonnicResult<Step> {
        let ledger = LedgerService::with_clock(self.storage, self.clock);
        let report = DashboardReport::generate(&ledger, account)?;

        self.console.write(&format_dashboard(&report, self.settings))?;
        Ok(Step::Continue)
    }

    fn history(
        &mut self,
        account: &Account,
        kind_filter: Option<TransactionKind>,
    ) -> SonnicResult<Step> {
        let ledger = LedgerService::with_clock(self.storage, self.clock);
        let transactions = ledger
            .history(account, kind_filter)?
            .collect::<SonnicResult<Vec<_>>>()?;

        self.console
            .write(&format_history(&transactions, kind_filter, self.settings))?;
        Ok(Step::Continue)
    }

    fn change_password(&mut self, user: &str) -> SonnicResult<Step> {
        let service = AccountService::new(self.storage, self.settings);

        let Some(current) = self.console.read_password("Enter current password: ")? else {
            return Ok(Step::EndOfInput);
        };
        if !service.verify_credentials(user, &current)? {
            return Err(SonnicError::Unauthorized);
        }

        let Some(new) = self.console.read_password("Enter new password: ")? else {
            return Ok(Step::EndOfInput);
        };

        service.update_password(user, &current, &new)?;
        self.console.say("Password updated successfully.")?;
        Ok(Step::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::FixedClock;
    use chrono::NaiveDate;

    fn settings() -> Settings {
        Settings {
            hash_passwords: false,
            ..Settings::default()
        }
    }

    fn run_script(storage: &Storage, settings: &Settings, script: &str) -> String {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        let mut output = Vec::new();
        {
            let console = Console::new(script.as_bytes(), &mut output, false);
            let mut app = App::new(storage, settings, console).with_clock(&clock);
            app.run().unwrap();
        }
        String::from_utf8(output).unwrap()
    }

    fn register_alice(storage: &Storage, settings: &Settings) {
        AccountService::new(storage, settings)
            .register("Alice", "pw1", 100, 1000)
            .unwrap();
    }

    #[test]
    fn test_choice_parsing() {
        assert_eq!(MainChoice::parse(" 2 ").unwrap(), MainChoice::Login);
        assert!(matches!(
            MainChoice::parse("4"),
            Err(SonnicError::InvalidOption(ref o)) if o == "4"
        ));
        assert_eq!(SessionChoice::parse("8").unwrap(), SessionChoice::Logout);
        assert!(SessionChoice::parse("").is_err());
    }

    #[test]
    fn test_full_savings_walkthrough() {
        let storage = Storage::in_memory();
        let settings = settings();

        let script = "1\nAlice\npw1\n100\n1000\n\
                      2\nAlice\npw1\n\
                      1\n500\n\
                      2\n600\n\
                      2\n500\n\n\
                      3\n\
                      8\n\
                      3\n";
        let output = run_script(&storage, &settings, script);

        assert!(output.contains("Registration successful, Alice!"));
        assert!(output.contains("Welcome back, Alice!"));
        assert!(output.contains("Deposit of ৳500 added on 2025-06-01."));
        assert!(output.contains("Insufficient balance: need 600, have 500"));
        assert!(output.contains("Withdraw of ৳500 added on 2025-06-01."));
        assert!(output.contains("Total Saved: ৳0"));
        assert!(output.contains("Days Saved: 1"));
        assert!(output.contains("Target Remaining: ৳1000"));
        assert!(output.contains("Deposits: 1 | Withdrawals: 1"));
        assert!(output.contains("Logged out successfully."));
        assert!(output.trim_end().ends_with("Goodbye!"));
        assert_eq!(storage.session.load().unwrap(), None);
    }

    #[test]
    fn test_invalid_option_reprompts() {
        let storage = Storage::in_memory();
        let output = run_script(&storage, &settings(), "9\n3\n");

        assert!(output.contains("Invalid option: '9'. Try again."));
        assert_eq!(output.matches("===== Sonnic Tracker =====").count(), 2);
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn test_auto_login_then_logout_returns_to_main_menu() {
        let storage = Storage::in_memory();
        let settings = settings();
        register_alice(&storage, &settings);
        storage.session.save("Alice").unwrap();

        let output = run_script(&storage, &settings, "8\n3\n");

        assert!(output.contains("Welcome back, Alice (auto-login)!"));
        assert!(output.contains("Logged out successfully."));
        assert!(output.contains("===== Sonnic Tracker ====="));
        assert_eq!(storage.session.load().unwrap(), None);
    }

    #[test]
    fn test_end_of_input_keeps_session() {
        let storage = Storage::in_memory();
        let settings = settings();
        register_alice(&storage, &settings);

        run_script(&storage, &settings, "2\nAlice\npw1\n");
        assert_eq!(storage.session.load().unwrap().as_deref(), Some("Alice"));
    }

    #[test]
    fn test_failed_login_stays_on_main_menu() {
        let storage = Storage::in_memory();
        let settings = settings();
        register_alice(&storage, &settings);

        let output = run_script(&storage, &settings, "2\nAlice\nbad\n3\n");

        assert!(output.contains("Login failed. Incorrect name or password."));
        assert!(!output.contains("===== Menu ====="));
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn test_duplicate_registration_reported() {
        let storage = Storage::in_memory();
        let settings = settings();
        register_alice(&storage, &settings);

        let output = run_script(&storage, &settings, "1\nAlice\n3\n");

        assert!(output.contains("User already exists: Alice"));
        assert!(!output.contains("Set your password"));
    }

    #[test]
    fn test_bad_amount_reported() {
        let storage = Storage::in_memory();
        let settings = settings();
        register_alice(&storage, &settings);
        storage.session.save("Alice").unwrap();

        let output = run_script(&storage, &settings, "1\nten\n1\n0\n6\n");

        assert!(output.contains("'ten' is not a whole number"));
        assert!(output.contains("Amount must be a positive whole number, got 0"));
        assert!(output.contains("No transaction history found."));
    }

    #[test]
    fn test_rejected_amounts_skip_note_and_keep_running() {
        let storage = Storage::in_memory();
        let settings = settings();
        register_alice(&storage, &settings);
        storage.session.save("Alice").unwrap();

        // The overdraw is refused before the note prompt, so "3" reaches the menu
        let script = format!("2\n5\n3\n1\n{}\n1\n1\n3\n", i64::MAX);
        let output = run_script(&storage, &settings, &script);

        assert!(output.contains("Insufficient balance: need 5, have 0."));
        assert!(!output.contains("Why are you withdrawing?"));
        assert!(output.contains("Deposit of 1 would take the balance past"));
        assert!(output.contains(&format!("Total Saved: ৳{}", i64::MAX)));
        assert!(output.contains("Deposits: 1 | Withdrawals: 0"));
    }

    #[test]
    fn test_histories_and_notes() {
        let storage = Storage::in_memory();
        let settings = settings();
        register_alice(&storage, &settings);
        storage.session.save("Alice").unwrap();

        let script = "1\n300\n2\n50\nbooks\n4\n5\n6\n";
        let output = run_script(&storage, &settings, script);

        assert!(output.contains("===== Deposit History ====="));
        assert!(output.contains("===== Withdraw History ====="));
        assert!(output.contains("===== Full History ====="));
        assert!(output.contains("books"));
    }

    #[test]
    fn test_change_password() {
        let storage = Storage::in_memory();
        let settings = settings();
        register_alice(&storage, &settings);
        storage.session.save("Alice").unwrap();

        let output = run_script(&storage, &settings, "7\nwrong\n7\npw1\npw2\n");

        assert!(output.contains("Incorrect current password."));
        assert!(output.contains("Password updated successfully."));

        let service = AccountService::new(&storage, &settings);
        assert!(service.verify_credentials("Alice", "pw2").unwrap());
        assert!(!service.verify_credentials("Alice", "pw1").unwrap());
    }
}
