use async_trait::async_trait;
use colored::Colorize;
use form_dns::Client;

use crate::args::{self, FlagEntry, FlagRule, FlagSchema, FlagType, ParsedArgs, COMMON_FLAGS};
use crate::output;
use crate::subcommand::{Resolution, SubcommandTable};

pub mod add;
pub mod import;
pub mod ls;
pub mod rm;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_HELP: i32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DnsCommand {
    Add,
    Import,
    Ls,
    Rm,
}

const DNS_FLAGS: &[FlagEntry] = &[
    ("--next", FlagRule::Type(FlagType::Integer)),
    ("-N", FlagRule::Alias("--next")),
    ("--limit", FlagRule::Type(FlagType::Integer)),
];

pub const DNS_SCHEMA: FlagSchema = FlagSchema::new(&[COMMON_FLAGS, DNS_FLAGS]);

pub const DNS_COMMANDS: SubcommandTable<DnsCommand> = SubcommandTable::new(&[
    (DnsCommand::Add, &["add"]),
    (DnsCommand::Import, &["import"]),
    (DnsCommand::Ls, &["ls", "list"]),
    (DnsCommand::Rm, &["rm", "remove"]),
]);

/// The operations `form dns` routes to. Each one returns the process exit
/// status for the invocation.
#[async_trait]
pub trait DnsHandlers: Send + Sync {
    async fn add(&self, client: &Client, flags: &ParsedArgs, args: &[String]) -> i32;
    async fn import(&self, client: &Client, flags: &ParsedArgs, args: &[String]) -> i32;
    async fn ls(&self, client: &Client, flags: &ParsedArgs, args: &[String]) -> i32;
    async fn rm(&self, client: &Client, flags: &ParsedArgs, args: &[String]) -> i32;
}

/// Handlers backed by the remote records API
pub struct RemoteHandlers;

#[async_trait]
impl DnsHandlers for RemoteHandlers {
    async fn add(&self, client: &Client, flags: &ParsedArgs, args: &[String]) -> i32 {
        add::add(client, flags, args).await
    }

    async fn import(&self, client: &Client, flags: &ParsedArgs, args: &[String]) -> i32 {
        import::import(client, flags, args).await
    }

    async fn ls(&self, client: &Client, flags: &ParsedArgs, args: &[String]) -> i32 {
        ls::ls(client, flags, args).await
    }

    async fn rm(&self, client: &Client, flags: &ParsedArgs, args: &[String]) -> i32 {
        rm::rm(client, flags, args).await
    }
}

pub fn help_text() -> String {
    format!(
        r#"
  {title} [options] <command>

  {commands}

    add     [details]             Add a new DNS entry (see below for examples)
    import  [domain] [zonefile]   Import a DNS zone file (see below for examples)
    rm      [id]                  Remove a DNS entry using its ID
    ls      [domain]              List all DNS entries for a domain

  {options}

    -h, --help                     Output usage information
    -A {file}, --local-config={file}   Path to the local `form.json` file
    -Q {dir}, --global-config={dir}    Path to the global `.formation` directory
    -d, --debug                    Debug mode [off]
    --no-color                     No color mode [off]
    -t {token}, --token={token}        Login token
    -S, --scope                    Set a custom scope
    -N, --next                     Show next page of results
    --limit={value}                  Number of results to return per page (default: 20, max: 100)

  {examples}

  {dash} Add an A record for a subdomain

      {add_a_usage}
      {add_a}

  {dash} Add an MX record (@ as a name refers to the domain)

      {add_mx_usage}
      {add_mx}

  {dash} Add an SRV record

      {add_srv_usage}
      {add_srv}

  {dash} Add a CAA record

      {add_caa_usage}
      {add_caa}

  {dash} Import a Zone file

      {import_usage}
      {import}

  {dash} Paginate results, where {cursor} is the time in milliseconds since the UNIX epoch.

      {page}
      {page_domain}
"#,
        title = "form dns".bold(),
        commands = "Commands:".dimmed(),
        options = "Options:".dimmed(),
        examples = "Examples:".dimmed(),
        dash = "-".bright_black(),
        file = "FILE".bold().underline(),
        dir = "DIR".bold().underline(),
        token = "TOKEN".bold().underline(),
        value = "VALUE".bold().underline(),
        cursor = "`1584722256178`".dimmed(),
        add_a_usage = "$ form dns add <DOMAIN> <SUBDOMAIN> <A | AAAA | ALIAS | CNAME | TXT>  <VALUE>".cyan(),
        add_a = "$ form dns add example.com api A 198.51.100.100".cyan(),
        add_mx_usage = "$ form dns add <DOMAIN> '@' MX <RECORD VALUE> <PRIORITY>".cyan(),
        add_mx = "$ form dns add example.com '@' MX mail.example.com 10".cyan(),
        add_srv_usage = "$ form dns add <DOMAIN> <NAME> SRV <PRIORITY> <WEIGHT> <PORT> <TARGET>".cyan(),
        add_srv = "$ form dns add example.com '@' SRV 10 0 389 example.party".cyan(),
        add_caa_usage = "$ form dns add <DOMAIN> <NAME> CAA '<FLAGS> <TAG> \"<VALUE>\"'".cyan(),
        add_caa = "$ form dns add example.com '@' CAA '0 issue \"example.com\"'".cyan(),
        import_usage = "$ form dns import <DOMAIN> <FILE>".cyan(),
        import = "$ form dns import example.com ./zonefile.txt".cyan(),
        page = "$ form dns ls --next 1584722256178".cyan(),
        page_domain = "$ form dns ls example.com --next 1584722256178".cyan(),
    )
}

pub fn help() {
    println!("{}", help_text());
}

/// Entry point for `form dns`. `argv` holds everything after the command
/// name. Returns the exit status: 1 for a bad command line, 2 when help was
/// shown, otherwise whatever the selected handler returned.
pub async fn run<H: DnsHandlers + ?Sized>(client: &Client, handlers: &H, argv: &[String]) -> i32 {
    match interpret(argv) {
        Ok(flags) => dispatch(client, handlers, &flags).await,
        Err(status) => status,
    }
}

/// Tokenizes `argv` against [`DNS_SCHEMA`]. On a bad command line or a help
/// request the message is printed here and `Err` carries the exit status.
pub fn interpret(argv: &[String]) -> Result<ParsedArgs, i32> {
    let flags = match args::parse(argv, &DNS_SCHEMA) {
        Ok(flags) => flags,
        Err(e) => {
            output::handle_error(&e);
            return Err(EXIT_FAILURE);
        }
    };

    if flags.boolean("--help") {
        help();
        return Err(EXIT_HELP);
    }

    Ok(flags)
}

/// Routes an already tokenized invocation to its handler.
pub async fn dispatch<H: DnsHandlers + ?Sized>(client: &Client, handlers: &H, flags: &ParsedArgs) -> i32 {
    let resolution = DNS_COMMANDS.resolve(flags.positional());
    log::debug!("Dispatching dns invocation: {resolution:?}");

    match resolution {
        Resolution::Matched { command: DnsCommand::Add, args } => handlers.add(client, flags, args).await,
        Resolution::Matched { command: DnsCommand::Import, args } => handlers.import(client, flags, args).await,
        Resolution::Matched { command: DnsCommand::Rm, args } => handlers.rm(client, flags, args).await,
        // A bare `form dns <domain>` lists that domain's records.
        Resolution::Matched { command: DnsCommand::Ls, args } | Resolution::Unmatched { args } => {
            handlers.ls(client, flags, args).await
        }
    }
}
