//! 学校管理系统 CLI 工具

use clap::{Parser, Subcommand, ValueEnum};
use school_admin_core::config::DEFAULT_API_URL;
use school_admin_core::transport::ReqwestTransport;
use school_admin_core::{
    ClientConfig, FileStorage, FormFile, LoginRequest, Navigation, Notice, Notifier, ReportStatus, SchoolClient,
    SessionStore, StudentListParams, SystemLogParams, TeacherListParams, TodoPatch, TodoStatus,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "school-admin")]
#[command(about = "学校管理系统客户端工具", long_about = None)]
struct Cli {
    /// 服务器地址
    #[arg(short, long, env = "SCHOOL_API_URL", default_value = DEFAULT_API_URL)]
    server: String,

    /// 会话文件路径，默认位于用户数据目录
    #[arg(long)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 用户登录
    Login {
        /// 用户名
        #[arg(short, long)]
        username: String,
        /// 密码
        #[arg(short, long)]
        password: String,
    },
    /// 用户登出
    Logout,
    /// 刷新访问令牌
    Refresh,
    /// 显示当前会话
    Whoami,
    /// 查看个人信息
    Profile,
    /// 首页统计
    Stats,
    /// 学生列表（管理员）
    Students {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        page_size: u32,
        /// 按姓名或学号搜索
        #[arg(short, long)]
        search: Option<String>,
    },
    /// 教师列表（管理员）
    Teachers {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        page_size: u32,
        #[arg(short, long)]
        search: Option<String>,
    },
    /// 从 Excel 批量导入（管理员）
    Import {
        #[arg(value_enum)]
        kind: ImportKind,
        /// 导入文件路径
        file: PathBuf,
    },
    /// 下载导入模板（管理员）
    Template {
        #[arg(value_enum)]
        kind: ImportKind,
        /// 输出文件路径
        #[arg(short, long)]
        output: PathBuf,
    },
    /// 操作日志（管理员）
    Logs {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        page_size: u32,
        /// 日志类型，如 login、create
        #[arg(short = 't', long)]
        log_type: Option<String>,
    },
    /// 更新学生报到状态（教师）
    Report {
        /// 学生 ID
        student_id: i64,
        #[arg(value_enum)]
        status: ReportArg,
    },
    /// 待办事项
    Todo {
        #[command(subcommand)]
        action: TodoAction,
    },
    /// 检查当前会话能否访问某个页面
    Route {
        /// 页面路径，如 /admin/settings
        path: String,
    },
}

#[derive(Subcommand)]
enum TodoAction {
    /// 列出待办
    List,
    /// 新建待办
    Add {
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        /// 截止日期，如 2024-09-10
        #[arg(long)]
        due: Option<String>,
    },
    /// 标记完成
    Done { id: i64 },
    /// 删除待办
    Remove { id: i64 },
}

#[derive(Clone, Copy, ValueEnum)]
enum ImportKind {
    Teachers,
    Students,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportArg {
    Pending,
    Reported,
    Deferred,
}

impl From<ReportArg> for ReportStatus {
    fn from(arg: ReportArg) -> Self {
        match arg {
            ReportArg::Pending => ReportStatus::Pending,
            ReportArg::Reported => ReportStatus::Reported,
            ReportArg::Deferred => ReportStatus::Deferred,
        }
    }
}

/// 把错误提示打印到标准错误
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, notice: &Notice) {
        eprintln!("提示: {}", notice);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    config.base_url = cli.server.clone();

    let session_file = match cli.session_file {
        Some(path) => path,
        None => FileStorage::default_path()?,
    };
    debug!("Using session file {:?}", session_file);

    // 会话文件损坏时仍要能登出
    if let Commands::Logout = cli.command {
        do_logout(config, &session_file)?;
        println!("登出成功!");
        return Ok(());
    }

    let client = build_client(config, &session_file)?;

    match cli.command {
        Commands::Login { username, password } => {
            do_login(&client, username, password).await?;
        }
        // 已在构建客户端之前处理
        Commands::Logout => {}
        Commands::Refresh => {
            client.auth().refresh_token().await?;
            println!("Token 已刷新");
        }
        Commands::Whoami => {
            do_whoami(&client);
        }
        Commands::Profile => {
            let profile = client.user().get_profile().await?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        Commands::Stats => {
            do_stats(&client).await?;
        }
        Commands::Students { page, page_size, search } => {
            let params = StudentListParams {
                search,
                ..StudentListParams::page(page, page_size)
            };
            let result = client.admin().get_student_list(&params).await?;
            println!("共 {} 名学生", result.total);
            for student in &result.list {
                let student_id = student
                    .student_profile()
                    .map(|p| p.student_id.as_str())
                    .unwrap_or("-");
                println!("{:>6}  {:<12} {}", student.id(), student_id, student.name());
            }
        }
        Commands::Teachers { page, page_size, search } => {
            let params = TeacherListParams {
                page,
                page_size,
                search,
                ..TeacherListParams::default()
            };
            let result = client.admin().get_teacher_list(&params).await?;
            println!("共 {} 名教师", result.total);
            for teacher in &result.list {
                let department = teacher
                    .teacher_profile()
                    .map(|p| p.department.as_str())
                    .unwrap_or("-");
                println!("{:>6}  {:<16} {}", teacher.id(), department, teacher.name());
            }
        }
        Commands::Import { kind, file } => {
            do_import(&client, kind, &file).await?;
        }
        Commands::Template { kind, output } => {
            let bytes = match kind {
                ImportKind::Teachers => client.admin().download_teacher_template().await?,
                ImportKind::Students => client.admin().download_student_template().await?,
            };
            std::fs::write(&output, &bytes)?;
            println!("模板已保存到: {:?}", output);
        }
        Commands::Logs { page, page_size, log_type } => {
            let params = SystemLogParams {
                page,
                page_size,
                log_type,
                ..SystemLogParams::default()
            };
            let result = client.admin().get_system_logs(&params).await?;
            println!("共 {} 条日志", result.total);
            for log in &result.list {
                println!(
                    "{}  {:<8} {:<12} {}",
                    log.created_at,
                    log.type_label(),
                    log.username.as_deref().unwrap_or("-"),
                    log.description.as_deref().unwrap_or("")
                );
            }
        }
        Commands::Report { student_id, status } => {
            client.teacher().update_report_status(student_id, status.into()).await?;
            println!("报到状态已更新");
        }
        Commands::Todo { action } => {
            do_todo(&client, action).await?;
        }
        Commands::Route { path } => {
            let decision = client.router().navigate(&path);
            match decision {
                Navigation::Allowed => println!("允许访问 {}", path),
                _ => println!("重定向到 {}", decision.redirect_path().unwrap_or("/")),
            }
        }
    }

    Ok(())
}

fn build_client(config: ClientConfig, session_file: &Path) -> anyhow::Result<SchoolClient> {
    let session = Arc::new(SessionStore::load(FileStorage::new(session_file))?);
    let transport = Arc::new(ReqwestTransport::new(config.clone())?);
    Ok(SchoolClient::with_parts(config, session, transport, Arc::new(StderrNotifier)))
}

/// 清除会话；文件无法解析时直接删除
fn do_logout(config: ClientConfig, session_file: &Path) -> anyhow::Result<()> {
    match build_client(config, session_file) {
        Ok(client) => client.logout()?,
        Err(e) => {
            warn!("Discarding unreadable session file {:?}: {}", session_file, e);
            match std::fs::remove_file(session_file) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
    }
    Ok(())
}

async fn do_login(client: &SchoolClient, username: String, password: String) -> anyhow::Result<()> {
    println!("正在登录用户: {}", username);

    let response = client.auth().login(&LoginRequest { username, password }).await?;

    println!("登录成功!");
    println!("用户: {} ({})", response.user.name, response.user.role);
    if let Ok(Some(last)) = client.stats().get_last_login().await {
        println!("上次登录: {}", last);
    }

    Ok(())
}

fn do_whoami(client: &SchoolClient) {
    let session = client.session().snapshot();
    if !session.is_logged_in() {
        println!("未登录");
        return;
    }

    println!("用户ID: {}", session.user_id);
    println!("姓名: {}", session.user_name);
    match session.role {
        Some(role) => println!("角色: {}", role),
        None => println!("角色: 未知"),
    }
}

async fn do_stats(client: &SchoolClient) -> anyhow::Result<()> {
    let overview = client.stats().get_overview().await?;

    let counts = [
        ("学生总数", overview.student_count),
        ("教师总数", overview.teacher_count),
        ("班级总数", overview.class_count),
        ("今日访问", overview.today_visits),
        ("管理班级", overview.managed_classes),
        ("待办事项", overview.todo_count),
    ];
    for (label, value) in counts {
        if let Some(value) = value {
            println!("{}: {}", label, value);
        }
    }
    if let Some(class_name) = &overview.class_name {
        println!("班级: {}", class_name);
    }
    if let Some(major) = &overview.major {
        println!("专业: {}", major);
    }

    Ok(())
}

async fn do_import(client: &SchoolClient, kind: ImportKind, file: &Path) -> anyhow::Result<()> {
    println!("正在导入: {:?}", file);

    let form = FormFile::from_path(file).await?;
    let result = match kind {
        ImportKind::Teachers => client.admin().import_teachers(form).await?,
        ImportKind::Students => client.admin().import_students(form).await?,
    };

    println!("导入完成: 共 {} 条，成功 {} 条，失败 {} 条", result.total, result.success, result.failed);
    for error in &result.errors {
        println!("  {}", error);
    }

    Ok(())
}

async fn do_todo(client: &SchoolClient, action: TodoAction) -> anyhow::Result<()> {
    let todo = client.todo();

    match action {
        TodoAction::List => {
            for item in todo.get_todos().await? {
                let mark = if item.status == TodoStatus::Completed { "x" } else { " " };
                println!("[{}] {:>4}  {}", mark, item.id, item.title);
            }
        }
        TodoAction::Add { title, description, due } => {
            let patch = TodoPatch {
                title: Some(title),
                description,
                due_date: due,
                status: Some(TodoStatus::Pending),
            };
            let created = todo.create_todo(&patch).await?;
            println!("已创建待办 #{}", created.id);
        }
        TodoAction::Done { id } => {
            let patch = TodoPatch {
                status: Some(TodoStatus::Completed),
                ..TodoPatch::default()
            };
            todo.update_todo(id, &patch).await?;
            println!("待办 #{} 已完成", id);
        }
        TodoAction::Remove { id } => {
            todo.delete_todo(id).await?;
            println!("待办 #{} 已删除", id);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use school_admin_core::{KeyValueStorage, SessionUpdate};
    use tempfile::TempDir;

    fn test_config() -> ClientConfig {
        ClientConfig::with_base_url("http://school.local/api")
    }

    #[test]
    fn test_logout_removes_corrupt_session_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"{not json").unwrap();
        assert!(build_client(test_config(), &path).is_err());

        do_logout(test_config(), &path).unwrap();

        assert!(!path.exists());
        assert!(build_client(test_config(), &path).is_ok());
    }

    #[test]
    fn test_logout_clears_saved_session() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let session = SessionStore::load(FileStorage::new(&path)).unwrap();
        session.set_user_info(SessionUpdate::token("abc")).unwrap();
        assert_eq!(FileStorage::new(&path).get("token").unwrap().as_deref(), Some("abc"));

        do_logout(test_config(), &path).unwrap();

        assert_eq!(FileStorage::new(&path).get("token").unwrap(), None);
        let client = build_client(test_config(), &path).unwrap();
        assert!(!client.session().is_logged_in());
    }

    #[test]
    fn test_logout_without_session_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.json");

        do_logout(test_config(), &path).unwrap();

        assert!(!path.exists());
    }
}
