//! Provider codes with localized, caller-facing messages.

use crate::domain::response::{NormalizedResult, ResultCode, SUCCESS_MESSAGE};

/// Look up a provider code.
///
/// Returns `None` for codes the table does not know; callers keep the provider's own text then.
pub fn lookup(code: &str) -> Option<NormalizedResult> {
    let (numeric, message) = entry(code)?;
    Some(NormalizedResult::new(ResultCode::Numeric(numeric), message))
}

fn entry(code: &str) -> Option<(i64, &'static str)> {
    Some(match code {
        "OK" => (200, SUCCESS_MESSAGE),

        // request signing and API surface
        "InvalidAccessKeyId.NotFound" => (401, "AccessKeyId 不存在"),
        "InvalidAccessKeyId.Inactive" => (401, "AccessKeyId 已被禁用"),
        "SignatureDoesNotMatch" => (401, "请求签名不匹配，请检查 AccessKeySecret"),
        "IncompleteSignature" => (401, "请求签名不完整"),
        "InvalidTimeStamp.Expired" => (401, "请求时间戳已过期，请检查本机时间"),
        "SignatureNonceUsed" => (401, "签名随机数已被使用"),
        "InvalidVersion" => (400, "API 版本号错误"),
        "InvalidAction.NotFound" => (404, "接口不存在"),
        "MissingParameter" => (400, "缺少必填参数"),
        "Throttling.User" => (429, "请求过于频繁，请稍后再试"),

        // account and product state
        "isp.RAM_PERMISSION_DENY" => (403, "RAM 权限不足"),
        "isv.OUT_OF_SERVICE" => (403, "业务停机，请检查账户余额"),
        "isv.PRODUCT_UN_SUBSCRIPT" => (403, "未开通云通信产品"),
        "isv.PRODUCT_UNSUBSCRIBE" => (403, "产品未开通"),
        "isv.ACCOUNT_NOT_EXISTS" => (403, "账户不存在"),
        "isv.ACCOUNT_ABNORMAL" => (403, "账户异常"),
        "isv.AMOUNT_NOT_ENOUGH" => (402, "账户余额不足"),
        "isv.DENY_IP_RANGE" => (403, "源 IP 地址所在的地区被禁用"),

        // sign and template
        "isv.SMS_SIGNATURE_ILLEGAL" => (400, "短信签名不合法"),
        "isv.SMS_SIGNATURE_SCENE_ILLEGAL" => (400, "短信签名使用场景非法"),
        "isv.SIGN_NAME_ILLEGAL" => (400, "签名名称不符合规范"),
        "isv.SMS_SIGN_ILLEGAL" => (400, "签名禁止使用"),
        "SIGNATURE_BLACKLIST" => (400, "签名内容涉及违规信息"),
        "isv.SMS_TEMPLATE_ILLEGAL" => (400, "短信模板不合法"),
        "isv.TEMPLATE_MISSING_PARAMETERS" => (400, "模板缺少变量"),
        "isv.TEMPLATE_PARAMS_ILLEGAL" => (400, "模板变量中包含非法关键字"),
        "isv.INVALID_JSON_PARAM" => (400, "JSON 参数不合法，只接受字符串值"),
        "isv.PARAM_LENGTH_LIMIT" => (400, "参数超出长度限制"),
        "isv.PARAM_NOT_SUPPORT_URL" => (400, "变量不支持传入 URL"),
        "isv.SMS_CONTENT_ILLEGAL" => (400, "短信内容包含禁止发送的内容"),
        "isv.EXTEND_CODE_ERROR" => (400, "扩展码使用错误"),
        "isv.DOMESTIC_NUMBER_NOT_SUPPORTED" => (400, "国际/港澳台消息模板不支持发送境内号码"),
        "isv.SMS_TEST_SIGN_TEMPLATE_LIMIT" => (400, "测试模板和签名限制"),
        "isv.SMS_TEST_TEMPLATE_PARAMS_ILLEGAL" => (400, "测试模板变量中只能包含数字"),

        // recipients and parameters
        "isv.INVALID_PARAMETERS" => (400, "参数异常"),
        "isv.MOBILE_NUMBER_ILLEGAL" => (400, "手机号码格式错误"),
        "isv.MOBILE_COUNT_OVER_LIMIT" => (400, "手机号码数量超过限制"),
        "isv.PHONENUMBERS_OVER_LIMIT" => (400, "手机号码数量超过限制"),
        "isv.SMS_TEST_NUMBER_LIMIT" => (400, "只能向已绑定的测试号码发送"),
        "isv.BLACK_KEY_CONTROL_LIMIT" => (400, "号码在黑名单中"),

        // flow control
        "isv.BUSINESS_LIMIT_CONTROL" => (429, "短信发送频率超限，请稍后再试"),
        "isv.DAY_LIMIT_CONTROL" => (429, "已达到当日发送上限"),
        "isv.MONTH_LIMIT_CONTROL" => (429, "已达到当月发送上限"),
        "isv.SMS_OVER_LIMIT" => (429, "单日最多申请模板或签名 100 条"),

        "isp.SYSTEM_ERROR" => (500, "短信服务系统错误，请稍后再试"),
        "ServiceUnavailable" => (503, "短信服务暂不可用"),
        _ => return None,
    })
}
