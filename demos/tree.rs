#[macro_use]
extern crate log;

use argh::FromArgs;

#[cfg(target_family = "windows")]
use smbfs_adapter::{MountedShare, SmbCredentials};
#[cfg(target_family = "unix")]
use smbfs_adapter::{SmbCredentials, SmbOptions, SmbShare};
use smbfs_adapter::{AdapterConfig, FilesystemAdapter, SmbAdapter, StorageAttributes, Visibility};

#[derive(FromArgs)]
#[argh(description = "
where positional can be: [smb://address[:port]]

Prints the tree of a directory on a SMB share")]
struct Args {
    #[argh(option, short = 'P', description = "specify password")]
    password: Option<String>,
    #[cfg(target_family = "windows")]
    #[argh(option, short = 'u', description = "specify username")]
    username: Option<String>,
    #[cfg(target_family = "unix")]
    #[argh(option, short = 'u', description = "specify username")]
    username: String,
    #[cfg(target_family = "unix")]
    #[argh(
        option,
        short = 'w',
        default = r#""WORKGROUP".to_string()"#,
        description = "specify workgroup"
    )]
    workgroup: String,
    #[argh(option, short = 's', description = "specify share")]
    share: String,
    #[argh(
        option,
        short = 'r',
        default = r#""/".to_string()"#,
        description = "root directory on the share"
    )]
    root: String,
    #[argh(switch, short = 'd', description = "list sub directories too")]
    deep: bool,
    #[argh(
        positional,
        description = "smb://address[:port] on UNIX and \\\\server\\share on Windows"
    )]
    server: String,
    #[argh(positional, default = r#"String::new()"#, description = "path to list")]
    path: String,
}

fn main() -> anyhow::Result<()> {
    assert!(env_logger::builder().try_init().is_ok());
    let args: Args = argh::from_env();
    let config = AdapterConfig::default().prefix(args.root.as_str());
    let (path, deep) = (args.path.clone(), args.deep);

    #[cfg(target_family = "unix")]
    let password = match &args.password {
        Some(p) => p.clone(),
        None => read_secret_from_tty("Password: ")?,
    };

    #[cfg(target_family = "unix")]
    let share = init_share(args, password)?;
    #[cfg(target_family = "windows")]
    let share = init_share(args)?;

    let adapter = SmbAdapter::with_config(share, config);
    info!(
        "listing entries at {}{}",
        adapter.prefix(),
        path.trim_start_matches('/')
    );
    for entry in adapter.list_contents(path.as_str(), deep)? {
        println!("{}", fmt_entry(&entry));
    }

    Ok(())
}

fn fmt_entry(entry: &StorageAttributes) -> String {
    match entry {
        StorageAttributes::Directory(dir) => format!("{}/", dir.path),
        StorageAttributes::File(file) => format!(
            "{}\t{} bytes{}",
            file.path,
            file.size.unwrap_or_default(),
            if entry.visibility() == Some(Visibility::Private) {
                "\t(private)"
            } else {
                ""
            }
        ),
    }
}

#[cfg(target_family = "windows")]
fn init_share(args: Args) -> anyhow::Result<MountedShare> {
    info!(
        "connecting to server {} and share {}",
        args.server, args.share
    );
    let mut credentials = SmbCredentials::new(args.server, args.share);
    if let Some(username) = args.username {
        credentials = credentials.username(username);
    }
    if let Some(password) = args.password {
        credentials = credentials.password(password);
    }
    let share = MountedShare::connect(credentials)?;
    info!("share connected");
    Ok(share)
}

#[cfg(target_family = "unix")]
fn init_share(args: Args, password: String) -> anyhow::Result<SmbShare> {
    info!(
        "initializing client with server {} and share {}, with username {} and workgroup {}",
        args.server, args.share, args.username, args.workgroup
    );
    let share = SmbShare::try_new(
        SmbCredentials::default()
            .server(args.server)
            .share(args.share)
            .username(args.username)
            .password(password)
            .workgroup(args.workgroup),
        SmbOptions::default()
            .one_share_per_server(true)
            .case_sensitive(false),
    )?;
    share.check_connection()?;
    info!("client connected");

    Ok(share)
}

#[cfg(target_family = "unix")]
/// Read a secret from tty with customisable prompt
fn read_secret_from_tty(prompt: &str) -> std::io::Result<String> {
    rpassword::prompt_password(prompt)
}
