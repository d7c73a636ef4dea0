use anyhow::Result;
use form_quiz_export::utils::logging;
use form_quiz_export::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置，第一个命令行参数覆盖表单地址
    let config = Config::from_env().with_form_url(std::env::args().nth(1));

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let _path = App::initialize(config).await?.run().await?;

    Ok(())
}
