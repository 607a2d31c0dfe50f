//! 外部命令执行
//!
//! [`CommandRunner`] 把真正的进程调用和测试中的脚本化替身隔离开，
//! 测试环境里没有 netsh，所有解析逻辑都通过替身驱动。

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::runtime::{Builder, Handle};
use tokio::time::timeout;

use crate::error::{Result, WifiError};

/// 默认调用的外部工具
pub const DEFAULT_PROGRAM: &str = "netsh";

/// 一次外部调用的原始输出
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// 被信号终止时没有退出码
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// 执行外部命令并返回原始输出
///
/// `run` 会阻塞当前线程，在异步代码中需要放到 `spawn_blocking` 里调用。
pub trait CommandRunner: Send + Sync {
    /// 外部工具名称，用于日志和错误信息
    fn program(&self) -> &str;

    /// 以给定参数运行外部工具
    fn run(&self, args: &[String]) -> Result<CommandOutput>;
}

/// 调用真实进程的实现
#[derive(Debug, Clone)]
pub struct SystemCommandRunner {
    program: String,
    timeout: Duration,
}

impl SystemCommandRunner {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    fn command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // 不弹出控制台窗口
        #[cfg(windows)]
        {
            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            cmd.creation_flags(CREATE_NO_WINDOW);
        }

        cmd
    }

    /// 运行外部工具，超时后结束子进程
    pub async fn output(&self, args: &[String]) -> Result<CommandOutput> {
        log::debug!("Running {} {}", self.program, args.join(" "));

        let child = self
            .command(args)
            .spawn()
            .map_err(|source| WifiError::Launch {
                program: self.program.clone(),
                source,
            })?;

        // 超时时 wait_with_output 连同子进程一起被丢弃，kill_on_drop 负责结束进程
        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(output) => output?,
            Err(_) => {
                log::warn!(
                    "{} did not finish within {}s, killing it",
                    self.program,
                    self.timeout.as_secs_f32()
                );
                return Err(WifiError::Timeout {
                    program: self.program.clone(),
                    secs: self.timeout.as_secs(),
                });
            }
        };

        let exit_code = output.status.code();
        log::debug!(
            "{} exited with {:?} ({} bytes)",
            self.program,
            exit_code,
            output.stdout.len()
        );

        Ok(CommandOutput {
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code,
        })
    }
}

impl CommandRunner for SystemCommandRunner {
    fn program(&self) -> &str {
        &self.program
    }

    fn run(&self, args: &[String]) -> Result<CommandOutput> {
        match Handle::try_current() {
            Ok(handle) => handle.block_on(self.output(args)),
            Err(_) => Builder::new_current_thread()
                .enable_all()
                .build()?
                .block_on(self.output(args)),
        }
    }
}

/// 测试用的脚本化替身
#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    type Script = dyn Fn(&[String]) -> Result<CommandOutput> + Send + Sync;

    /// 按参数返回预设输出，同时记录调用情况
    pub struct ScriptedRunner {
        script: Box<Script>,
        delay: Duration,
        calls: Mutex<Vec<Vec<String>>>,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl ScriptedRunner {
        pub fn new<F>(script: F) -> Self
        where
            F: Fn(&[String]) -> Result<CommandOutput> + Send + Sync + 'static,
        {
            Self {
                script: Box::new(script),
                delay: Duration::ZERO,
                calls: Mutex::new(Vec::new()),
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }

        /// 每次调用前阻塞一段时间，用于观察并发度
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        pub fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().expect("calls lock").clone()
        }

        pub fn peak_in_flight(&self) -> usize {
            self.peak.load(Ordering::SeqCst)
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn program(&self) -> &str {
            "netsh"
        }

        fn run(&self, args: &[String]) -> Result<CommandOutput> {
            self.calls.lock().expect("calls lock").push(args.to_vec());

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
            let result = (self.script)(args);
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            result
        }
    }

    /// 退出码为 0 的 UTF-8 输出
    pub fn ok(text: &str) -> Result<CommandOutput> {
        Ok(CommandOutput {
            stdout: text.as_bytes().to_vec(),
            stderr: Vec::new(),
            exit_code: Some(0),
        })
    }

    /// 指定退出码的输出
    pub fn exit(code: i32, text: &str) -> Result<CommandOutput> {
        Ok(CommandOutput {
            stdout: text.as_bytes().to_vec(),
            stderr: Vec::new(),
            exit_code: Some(code),
        })
    }

    /// 模拟外部工具不存在
    pub fn launch_failure() -> Result<CommandOutput> {
        Err(WifiError::Launch {
            program: "netsh".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "program not found"),
        })
    }
}
