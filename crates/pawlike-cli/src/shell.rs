//! Interactive terminal front end: one screen per view.

use crate::cli::{DEFAULT_CONFIG, ShellArgs};
use crate::render;
use pawlike::auth::{self, AuthValues};
use pawlike::{
    ClientConfig, ClientResult, DogApi, Feed, Form, HttpClient, MemoryApi, Navigator, Profile,
    Session, Submission, ToggleOutcome, View,
};
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

const DEMO_EMAIL: &str = "demo@pawlike.dev";
const DEMO_PASSWORD: &str = "Passw0rd!";

type Input = Lines<BufReader<Stdin>>;

pub async fn run(args: ShellArgs) -> anyhow::Result<()> {
    if args.offline {
        render::print_info(&format!(
            "offline mode, demo account {DEMO_EMAIL} / {DEMO_PASSWORD}"
        ));
        let api = MemoryApi::default().with_user(DEMO_EMAIL, DEMO_PASSWORD);
        return Shell::new(api).run().await;
    }

    let config = resolve_config(&args)?;
    tracing::info!(target: "pawlike.api", base_url = %config.base_url, "using API");
    let api = HttpClient::new(&config)?;
    Shell::new(api).run().await
}

/// Config file first, then the environment; `--api-url` overrides either.
fn resolve_config(args: &ShellArgs) -> anyhow::Result<ClientConfig> {
    let from_file = match &args.config {
        Some(path) => Some(ClientConfig::load(path)?),
        None if Path::new(DEFAULT_CONFIG).exists() => Some(ClientConfig::load(DEFAULT_CONFIG)?),
        None => None,
    };

    let config = match (from_file, args.api_url.as_deref()) {
        (Some(file), Some(url)) => ClientConfig::new(url)?.with_timeout(file.timeout),
        (Some(file), None) => file,
        (None, Some(url)) => ClientConfig::new(url)?,
        (None, None) => ClientConfig::from_env()?,
    };
    Ok(config)
}

struct Shell<A> {
    api: A,
    session: Session,
    nav: Navigator,
    feed: Feed,
    profile: Profile,
    login: Form<AuthValues>,
    register: Form<AuthValues>,
}

impl<A: DogApi> Shell<A> {
    fn new(api: A) -> Self {
        Self {
            api,
            session: Session::new(),
            nav: Navigator::default(),
            feed: Feed::new(),
            profile: Profile::new(),
            login: auth::login_form(),
            register: auth::register_form(),
        }
    }

    async fn run(mut self) -> anyhow::Result<()> {
        let mut input = BufReader::new(tokio::io::stdin()).lines();

        render::print_banner();
        self.next_dog().await;

        loop {
            let view = self.nav.current();
            self.show(view);

            let menu = render::menu(view, self.session.is_authenticated());
            let Some(line) = prompt(&mut input, menu).await? else {
                break;
            };
            let key = line.trim();
            if key == "q" {
                break;
            }

            match view {
                View::Home => self.on_home(key).await,
                View::Login => self.on_auth(&mut input, false, key).await?,
                View::Register => self.on_auth(&mut input, true, key).await?,
                View::Profile => self.on_profile(key).await,
            }
        }

        println!("bye!");
        Ok(())
    }

    fn show(&self, view: View) {
        render::print_header(view, self.session.user_id());
        match view {
            View::Home => render::print_image(&self.feed),
            View::Login => render::print_form(&self.login),
            View::Register => render::print_form(&self.register),
            View::Profile if self.profile.is_empty() => {
                render::print_info("no liked dogs yet");
            }
            View::Profile => println!("{}", render::liked_table(self.profile.images())),
        }
    }

    async fn on_home(&mut self, key: &str) {
        match key {
            "n" | "" => self.next_dog().await,
            "l" if self.session.is_authenticated() => self.toggle_like().await,
            "l" => render::print_warning("log in to like dogs"),
            "p" => self.open_profile().await,
            "i" => {
                self.nav.change_view(View::Login);
            }
            "r" => {
                self.nav.change_view(View::Register);
            }
            "o" => self.logout().await,
            other => render::print_warning(&format!("unknown key: {other}")),
        }
    }

    async fn on_profile(&mut self, key: &str) {
        match key {
            "b" => {
                self.nav.change_view(View::Home);
            }
            "r" | "" => self.open_profile().await,
            "o" => self.logout().await,
            other => render::print_warning(&format!("unknown key: {other}")),
        }
    }

    async fn on_auth(
        &mut self,
        input: &mut Input,
        registering: bool,
        key: &str,
    ) -> anyhow::Result<()> {
        let field = match key {
            "e" => "email",
            "w" => "password",
            "s" => {
                self.submit(registering).await;
                return Ok(());
            }
            "b" => {
                self.nav.change_view(View::Home);
                return Ok(());
            }
            other => {
                render::print_warning(&format!("unknown key: {other}"));
                return Ok(());
            }
        };

        let Some(value) = prompt(input, &format!("{field}:")).await? else {
            return Ok(());
        };
        let form = if registering {
            &mut self.register
        } else {
            &mut self.login
        };
        form.set_field_value(field, value.trim())?;
        form.handle_blur(field);
        Ok(())
    }

    async fn submit(&mut self, registering: bool) {
        let result = if registering {
            auth::submit_register(
                &mut self.register,
                &self.api,
                &mut self.session,
                &mut self.nav,
            )
            .await
        } else {
            auth::submit_login(&mut self.login, &self.api, &mut self.session, &mut self.nav).await
        };

        match result {
            Ok(Submission::Completed) => {
                render::print_success("signed in");
                // The liked flag of the current dog depends on who is looking.
                self.next_dog().await;
            }
            Ok(Submission::Rejected) => render::print_warning("please fix the errors above"),
            Err(err) => render::print_error(&err),
        }
    }

    async fn next_dog(&mut self) {
        if let Err(err) = self.feed.fetch_next(&self.api, &self.session).await {
            render::print_error(&err);
        }
    }

    async fn toggle_like(&mut self) {
        match self.feed.toggle_like(&self.api, &self.session).await {
            Ok(ToggleOutcome::Committed(true)) => render::print_success("liked"),
            Ok(ToggleOutcome::Committed(false)) => render::print_success("unliked"),
            Ok(ToggleOutcome::Ignored) => render::print_info("nothing to like yet"),
            Err(err) => render::print_error(&err),
        }
    }

    async fn open_profile(&mut self) {
        self.nav.change_view(View::Profile);
        if let Err(err) = self.load_profile().await {
            render::print_error(&err);
        }
    }

    async fn load_profile(&mut self) -> ClientResult<()> {
        self.profile
            .load(&self.api, &self.session, &mut self.nav)
            .await
            .map(drop)
    }

    async fn logout(&mut self) {
        auth::logout(&mut self.session, &mut self.nav);
        self.profile = Profile::new();
        render::print_success("signed out");
        self.next_dog().await;
    }
}

async fn prompt(input: &mut Input, label: &str) -> anyhow::Result<Option<String>> {
    print!("{label} > ");
    std::io::stdout().flush()?;
    Ok(input.next_line().await?)
}
